//! Startup loading of the trained model and its column schema.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

use crate::domain::{FeatureSchema, SchemaError};
use crate::infra::forest::{ForestExport, ModelLoadError, RandomForestModel};
use crate::util::config::AppConfig;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid column schema in {path}: {source}")]
    Schema { path: PathBuf, source: SchemaError },
    #[error("invalid model in {path}: {source}")]
    Model {
        path: PathBuf,
        source: ModelLoadError,
    },
    #[error("model expects {model} features but the column schema lists {schema}")]
    WidthMismatch { model: usize, schema: usize },
}

/// Model and schema loaded once at startup and shared read-only with the UI.
#[derive(Debug)]
pub struct PredictorBundle {
    pub schema: FeatureSchema,
    pub model: RandomForestModel,
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
}

#[derive(Clone, Debug)]
pub enum ArtifactStatus {
    Ready(Arc<PredictorBundle>),
    Unavailable(String),
}

impl ArtifactStatus {
    pub fn load(config: &AppConfig) -> Self {
        match load_bundle(config) {
            Ok(bundle) => {
                tracing::info!(
                    columns = bundle.schema.len(),
                    trees = bundle.model.tree_count(),
                    model = %bundle.model_path.display(),
                    "prediction artifacts loaded"
                );
                ArtifactStatus::Ready(Arc::new(bundle))
            }
            Err(err) => {
                tracing::error!(error = %err, "prediction artifacts unavailable");
                ArtifactStatus::Unavailable(err.to_string())
            }
        }
    }

    pub fn bundle(&self) -> Option<&Arc<PredictorBundle>> {
        match self {
            ArtifactStatus::Ready(bundle) => Some(bundle),
            ArtifactStatus::Unavailable(_) => None,
        }
    }
}

pub fn load_bundle(config: &AppConfig) -> Result<PredictorBundle, ArtifactError> {
    let schema = load_schema(&config.columns_path)?;
    let model = load_model(&config.model_path)?;

    if model.n_features() != schema.len() {
        return Err(ArtifactError::WidthMismatch {
            model: model.n_features(),
            schema: schema.len(),
        });
    }

    Ok(PredictorBundle {
        schema,
        model,
        model_path: config.model_path.clone(),
        columns_path: config.columns_path.clone(),
    })
}

pub fn load_schema(path: &Path) -> Result<FeatureSchema, ArtifactError> {
    let columns: Vec<String> = read_json(path)?;
    FeatureSchema::new(columns).map_err(|source| ArtifactError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_model(path: &Path) -> Result<RandomForestModel, ArtifactError> {
    let export: ForestExport = read_json(path)?;
    RandomForestModel::from_export(export).map_err(|source| ArtifactError::Model {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
