use crate::components::PlayerHandle;
use dioxus::prelude::*;

mod controls;

use controls::{PlayPauseButton, SkipBackButton, SkipForwardButton};

pub const PLAY_PAUSE_BUTTON_ID: &str = "play-pause-btn";
pub const SKIP_BACK_BUTTON_ID: &str = "skip-back-btn";
pub const SKIP_FORWARD_BUTTON_ID: &str = "skip-forward-btn";

#[component]
pub fn TransportBar() -> Element {
    let player = use_context::<PlayerHandle>();
    let model = player.transport();
    let skip_seconds = player.settings().skip_seconds;

    rsx! {
        div { class: "transport",
            div { class: "transport__info",
                p { class: "transport__title",
                    {model.now_playing.clone().unwrap_or_else(|| "Nothing playing".to_string())}
                }
                span { class: "transport__time", "{model.time_text()}" }
            }

            div { class: "transport__controls",
                SkipBackButton { enabled: model.enabled, seconds: skip_seconds }
                PlayPauseButton { enabled: model.enabled, label: model.button_label }
                SkipForwardButton { enabled: model.enabled, seconds: skip_seconds }
            }

            if let Some(notice) = model.notice.clone() {
                p { class: "transport__notice", role: "status", "{notice}" }
            }
        }
    }
}
