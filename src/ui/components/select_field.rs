use dioxus::prelude::*;

/// Labelled drop-down over a fixed list of option labels.
#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<&'static str>,
    value: &'static str,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            label { class: "field-label", "{label}" }
            select {
                class: "field-input",
                value: "{value}",
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
                for choice in options {
                    option { key: "{choice}", value: "{choice}", selected: choice == value, "{choice}" }
                }
            }
        }
    }
}
