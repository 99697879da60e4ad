use crate::components::media_manager::{AUDIO_ELEMENT_ID, VIDEO_ELEMENT_ID};
use crate::components::{Icon, PlayerHandle};
use crate::player::MediaKind;
use dioxus::prelude::*;

/// The audio and video elements plus what is shown around them.
/// Visibility of the elements themselves belongs to the media backend.
#[component]
pub fn MediaSurface() -> Element {
    let player = use_context::<PlayerHandle>();
    let transport = player.transport();

    rsx! {
        div { class: "media-surface",
            video { id: VIDEO_ELEMENT_ID, class: "media-surface__video", preload: "metadata" }
            audio { id: AUDIO_ELEMENT_ID, class: "media-surface__audio", preload: "metadata" }

            match (transport.kind, transport.now_playing) {
                (Some(MediaKind::Video), _) => rsx! {},
                (Some(MediaKind::Audio), Some(name)) => rsx! {
                    div { class: "media-surface__card",
                        Icon { name: "music".to_string(), class: "w-12 h-12".to_string() }
                        p { class: "media-surface__title", "{name}" }
                    }
                },
                _ => rsx! {
                    div { class: "media-surface__placeholder",
                        Icon { name: "film".to_string(), class: "w-12 h-12".to_string() }
                        p { "Add audio or video files to start" }
                    }
                },
            }
        }
    }
}
