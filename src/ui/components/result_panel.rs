use dioxus::prelude::*;

use crate::domain::{OutcomeLevel, PredictionOutcome};

#[component]
pub fn ResultPanel(outcome: PredictionOutcome) -> Element {
    let (modifier, icon) = match outcome.level() {
        OutcomeLevel::Success => ("success", "🎯"),
        OutcomeLevel::Warning => ("warning", "⚠️"),
        OutcomeLevel::Error => ("error", "⚠️"),
    };
    let headline = outcome.headline();

    rsx! {
        div { class: "result-panel {modifier}",
            p { class: "result-headline", "{icon} {headline}" }
            if let Some(diagnostic) = outcome.diagnostic() {
                pre { class: "result-diagnostic", code { "{diagnostic}" } }
            }
        }
    }
}
