use crate::components::{Icon, PlayerHandle};
use crate::player::{MediaKind, EMPTY_PLAYLIST};
use dioxus::prelude::*;

#[component]
pub fn PlaylistPanel() -> Element {
    let player = use_context::<PlayerHandle>();
    let rows = player.playlist_rows();

    rsx! {
        aside { class: "playlist",
            header { class: "playlist__header",
                h2 { "Playlist" }
                span { class: "playlist__count", "{rows.len()}" }
            }

            if rows.is_empty() {
                p { class: "playlist__empty", "{EMPTY_PLAYLIST}" }
            } else {
                ul { class: "playlist__items",
                    for row in rows {
                        {
                            let idx = row.index;
                            let icon = match row.kind {
                                MediaKind::Audio => "music",
                                MediaKind::Video => "film",
                            };
                            rsx! {
                                li {
                                    key: "{row.id}",
                                    class: if row.is_playing { "playlist__item playing" } else { "playlist__item" },
                                    onclick: move |_| player.select(idx),
                                    Icon { name: icon.to_string(), class: "w-4 h-4".to_string() }
                                    span { class: "playlist__label", title: "{row.label}", "{row.label}" }
                                    button {
                                        r#type: "button",
                                        class: "playlist__remove",
                                        aria_label: "Remove",
                                        onclick: move |evt| {
                                            evt.stop_propagation();
                                            player.remove(idx);
                                        },
                                        Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
