use crate::components::media_manager::{EventSink, MediaSource, PageBackend};
use crate::components::{
    FilePicker, Icon, MediaSurface, PageController, PlayerHandle, PlaylistPanel, TransportBar,
};
use crate::player::{load_settings, Catalog, PlaybackController, SessionEvent};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use futures_util::StreamExt;
use std::rc::Rc;

/// Wrap the event coroutine so element callbacks can feed it from outside
/// the component render cycle.
#[cfg(target_arch = "wasm32")]
fn event_sink(events: Coroutine<SessionEvent>) -> EventSink {
    let runtime = Runtime::current();
    Rc::new(move |event: SessionEvent| {
        let _guard = RuntimeGuard::new(runtime.clone());
        events.send(event);
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn event_sink(events: Coroutine<SessionEvent>) -> EventSink {
    Rc::new(move |event: SessionEvent| events.send(event))
}

#[component]
pub fn AppShell() -> Element {
    let catalog = use_signal(Catalog::<MediaSource>::new);
    let mut controller = use_signal(|| None::<PageController>);
    let warning = use_signal(|| None::<String>);
    let settings = use_hook(load_settings);
    let player = PlayerHandle::new(catalog, controller, warning);

    // Provide state via context
    use_context_provider(|| player);

    // Element events are applied one at a time, never while a handler
    // still holds the player.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<SessionEvent>| async move {
        while let Some(event) = rx.next().await {
            player.dispatch(event);
        }
    });

    // One-time setup: bind the rendered media elements.
    use_effect(move || {
        if controller.peek().is_some() {
            return;
        }
        match PageBackend::attach(event_sink(events)) {
            Some(backend) => {
                #[cfg(target_arch = "wasm32")]
                crate::components::media_manager::install_keyboard_shortcuts();
                tracing::info!("media elements ready");
                controller.set(Some(PlaybackController::new(backend, settings.clone())));
            }
            None => tracing::warn!("media elements unavailable, playback disabled"),
        }
    });

    use_drop(move || player.shutdown());

    let warning_text = player.warning();

    rsx! {
        div { class: "app-container",
            header { class: "app-header",
                div { class: "app-header__title",
                    Icon { name: "music".to_string(), class: "w-6 h-6".to_string() }
                    h1 { "MediaDeck" }
                }
                FilePicker {}
            }

            if let Some(message) = warning_text {
                div { class: "app-warning", role: "alert",
                    span { "{message}" }
                    button {
                        r#type: "button",
                        class: "app-warning__dismiss",
                        aria_label: "Dismiss",
                        onclick: move |_| player.dismiss_warning(),
                        Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                    }
                }
            }

            main { class: "app-main",
                div { class: "app-stage",
                    MediaSurface {}
                    TransportBar {}
                }
                PlaylistPanel {}
            }
        }
    }
}
