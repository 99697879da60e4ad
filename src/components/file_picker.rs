use crate::components::media_manager::MediaSource;
use crate::components::{Icon, PlayerHandle};
use crate::player::Candidate;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlInputElement};

const FILE_INPUT_ID: &str = "mediadeck-file-input";

/// Drain the file input into a selection batch. The input is cleared so the
/// same files can be picked again.
#[cfg(target_arch = "wasm32")]
fn take_selected_files() -> Vec<Candidate<MediaSource>> {
    let Some(input) = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(FILE_INPUT_ID))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Vec::new();
    };

    let mut batch = Vec::new();
    if let Some(files) = input.files() {
        for i in 0..files.length() {
            if let Some(file) = files.get(i) {
                let name = file.name();
                let content_type = file.type_();
                batch.push(Candidate::new(file, name, content_type));
            }
        }
    }
    input.set_value("");
    batch
}

#[cfg(not(target_arch = "wasm32"))]
fn take_selected_files() -> Vec<Candidate<MediaSource>> {
    Vec::new()
}

/// Add files button
#[component]
pub fn FilePicker() -> Element {
    let player = use_context::<PlayerHandle>();

    rsx! {
        label { class: "file-picker", r#for: FILE_INPUT_ID,
            Icon { name: "plus".to_string(), class: "w-4 h-4".to_string() }
            span { "Add files" }
        }
        input {
            id: FILE_INPUT_ID,
            class: "file-picker__input",
            r#type: "file",
            multiple: true,
            accept: "audio/*,video/*",
            onchange: move |_| {
                let batch = take_selected_files();
                if !batch.is_empty() {
                    player.enqueue(batch);
                }
            },
        }
    }
}
