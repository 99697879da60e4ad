use dioxus::prelude::*;

mod components;
mod player;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "MediaDeck" }
        document::Meta { name: "theme-color", content: "#18181b" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
