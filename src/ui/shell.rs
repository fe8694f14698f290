use dioxus::prelude::*;

use crate::app::Route;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        header { class: "shell-header",
            div {
                h1 { class: "shell-title", "✈️ {APP_NAME}" }
                p { class: "shell-tagline", "Estimated fares for domestic routes" }
            }
            nav { class: "nav",
                NavButton {
                    active: matches!(current_route, Route::Predict {}),
                    onclick: move |_| { nav.push(Route::Predict {}); },
                    label: "🔍 Predict",
                }
                NavButton {
                    active: matches!(current_route, Route::Model {}),
                    onclick: move |_| { nav.push(Route::Model {}); },
                    label: "🌲 Model",
                }
            }
        }
        main { class: "shell-main", {children} }
        footer { class: "shell-footer", "{APP_NAME} {version_label()}" }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active { "nav-button active" } else { "nav-button" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
