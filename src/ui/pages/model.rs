use dioxus::prelude::*;

use crate::{infra::artifacts::ArtifactStatus, ui::components::kpi_card::KpiCard};

/// Read-only view of the artifacts the predictor was started with.
#[component]
pub fn ModelPage() -> Element {
    let artifacts = use_context::<ArtifactStatus>();

    let bundle = match artifacts {
        ArtifactStatus::Ready(bundle) => bundle,
        ArtifactStatus::Unavailable(reason) => {
            return rsx! {
                div { class: "result-panel error",
                    p { class: "result-headline", "⚠️ No model loaded." }
                    pre { class: "result-diagnostic", code { "{reason}" } }
                }
            };
        }
    };

    let columns = bundle.schema.columns().to_vec();
    let named = if bundle.model.feature_names().is_some() {
        "Column names are checked on every prediction"
    } else {
        "Export carries no column names; only the width is checked"
    };

    rsx! {
        div { class: "kpi-grid",
            KpiCard {
                title: "Trees".to_string(),
                value: bundle.model.tree_count().to_string(),
                description: Some("Estimates are averaged across trees".to_string()),
            }
            KpiCard {
                title: "Features".to_string(),
                value: bundle.model.n_features().to_string(),
                description: Some(named.to_string()),
            }
            KpiCard {
                title: "Schema Columns".to_string(),
                value: columns.len().to_string(),
                description: Some("Columns not set by the form are 0".to_string()),
            }
        }

        div { class: "panel", style: "margin-top: 1.5rem;",
            p { class: "field-label", "Model" }
            p { class: "field-hint", "{bundle.model_path.display()}" }
            p { class: "field-label", "Column schema" }
            p { class: "field-hint", "{bundle.columns_path.display()}" }
            ol { class: "column-list",
                for column in columns {
                    li { key: "{column}", "{column}" }
                }
            }
        }
    }
}
