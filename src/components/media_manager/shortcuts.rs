// Keyboard shortcuts that press the transport buttons.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlElement, KeyboardEvent};

use crate::components::transport::{PLAY_PAUSE_BUTTON_ID, SKIP_BACK_BUTTON_ID, SKIP_FORWARD_BUTTON_ID};

fn is_editable_shortcut_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

fn shortcut_target(event: &KeyboardEvent) -> Option<&'static str> {
    if event.default_prevented() || event.is_composing() || is_editable_shortcut_target(event) {
        return None;
    }
    if event.meta_key() || event.ctrl_key() || event.alt_key() {
        return None;
    }

    match event.key().as_str() {
        " " | "Spacebar" | "MediaPlayPause" => Some(PLAY_PAUSE_BUTTON_ID),
        "ArrowLeft" | "MediaRewind" => Some(SKIP_BACK_BUTTON_ID),
        "ArrowRight" | "MediaFastForward" => Some(SKIP_FORWARD_BUTTON_ID),
        _ => None,
    }
}

fn click_transport_button(id: &str) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(element) = doc.get_element_by_id(id) {
            if let Ok(html) = element.dyn_into::<HtmlElement>() {
                html.click();
            }
        }
    }
}

/// Route space and the arrow keys to the transport buttons. Disabled buttons
/// ignore the synthetic click.
pub fn install_keyboard_shortcuts() {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };

    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if let Some(id) = shortcut_target(&event) {
            event.prevent_default();
            click_transport_button(id);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    key_cb.forget();
}
