use super::{PLAY_PAUSE_BUTTON_ID, SKIP_BACK_BUTTON_ID, SKIP_FORWARD_BUTTON_ID};
use crate::components::{Icon, PlayerHandle};
use dioxus::prelude::*;

const BUTTON_CLASS: &str = "transport__button";

/// Play/Pause button. The label comes from the session state.
#[component]
pub(super) fn PlayPauseButton(enabled: bool, label: &'static str) -> Element {
    let player = use_context::<PlayerHandle>();
    let icon = if label == "Pause" { "pause" } else { "play" };

    rsx! {
        button {
            id: PLAY_PAUSE_BUTTON_ID,
            r#type: "button",
            disabled: !enabled,
            class: "{BUTTON_CLASS} transport__button--primary",
            aria_label: label,
            onclick: move |_| player.toggle_play_pause(),
            Icon { name: icon.to_string(), class: "w-5 h-5".to_string() }
            span { class: "transport__button-label", "{label}" }
        }
    }
}

#[component]
pub(super) fn SkipBackButton(enabled: bool, seconds: f64) -> Element {
    let player = use_context::<PlayerHandle>();

    rsx! {
        button {
            id: SKIP_BACK_BUTTON_ID,
            r#type: "button",
            disabled: !enabled,
            class: BUTTON_CLASS,
            title: "Back {seconds}s",
            onclick: move |_| player.skip_back(),
            Icon { name: "rewind".to_string(), class: "w-5 h-5".to_string() }
        }
    }
}

#[component]
pub(super) fn SkipForwardButton(enabled: bool, seconds: f64) -> Element {
    let player = use_context::<PlayerHandle>();

    rsx! {
        button {
            id: SKIP_FORWARD_BUTTON_ID,
            r#type: "button",
            disabled: !enabled,
            class: BUTTON_CLASS,
            title: "Forward {seconds}s",
            onclick: move |_| player.skip_forward(),
            Icon { name: "forward".to_string(), class: "w-5 h-5".to_string() }
        }
    }
}
