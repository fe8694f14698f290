use dioxus::prelude::*;

use crate::{
    domain::AppState,
    infra::artifacts::ArtifactStatus,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{ModelPage, PredictPage},
        shell::Shell,
    },
    util::{assets, config::AppConfig},
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Predict {},
    #[route("/model")]
    Model {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::new);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // Model and schema are read once per window and shared read-only.
    let artifacts = use_hook(|| ArtifactStatus::load(&AppConfig::load()));
    use_context_provider(|| artifacts.clone());

    let status = artifacts.clone();
    use_effect(move || {
        let (kind, text) = load_notice(&status);
        push_toast(toasts, kind, text);
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

fn load_notice(status: &ArtifactStatus) -> (ToastKind, String) {
    match status {
        ArtifactStatus::Ready(bundle) => (
            ToastKind::Info,
            format!(
                "Loaded model with {} trees and {} columns.",
                bundle.model.tree_count(),
                bundle.schema.len()
            ),
        ),
        ArtifactStatus::Unavailable(_) => (
            ToastKind::Error,
            "Model artifacts could not be loaded. See the Model page.".to_string(),
        ),
    }
}

#[component]
pub fn Predict() -> Element {
    rsx! { Shell { PredictPage {} } }
}

#[component]
pub fn Model() -> Element {
    rsx! { Shell { ModelPage {} } }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::infra::artifacts::load_bundle;

    #[test]
    fn load_notice_reports_shipped_artifacts() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = AppConfig {
            model_path: root.join(crate::util::config::DEFAULT_MODEL_FILE),
            columns_path: root.join(crate::util::config::DEFAULT_COLUMNS_FILE),
        };
        let status = ArtifactStatus::Ready(load_bundle(&config).unwrap().into());
        assert_eq!(
            load_notice(&status),
            (
                ToastKind::Info,
                "Loaded model with 3 trees and 30 columns.".to_string()
            )
        );
    }

    #[test]
    fn load_notice_points_to_model_page_on_failure() {
        let status = ArtifactStatus::Unavailable("failed to read".into());
        let (kind, text) = load_notice(&status);
        assert_eq!(kind, ToastKind::Error);
        assert!(text.contains("Model page"));
    }
}
