//! Random-forest regressor evaluated from a JSON export of fitted trees.
//!
//! Each tree is stored as parallel node arrays (`children_left`,
//! `children_right`, `feature`, `threshold`, `value`). A node whose left
//! child is `-1` is a leaf.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{EncodedRow, PredictionError, Regressor};

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelLoadError {
    #[error("model contains no trees")]
    NoTrees,
    #[error("model declares zero input features")]
    NoFeatures,
    #[error("tree {tree}: node arrays have mismatched lengths")]
    RaggedArrays { tree: usize },
    #[error("tree {tree}: has no nodes")]
    EmptyTree { tree: usize },
    #[error("tree {tree}, node {node}: child index {child} is out of range")]
    ChildOutOfRange { tree: usize, node: usize, child: i64 },
    #[error("tree {tree}, node {node}: split feature {feature} is out of range")]
    FeatureOutOfRange { tree: usize, node: usize, feature: i64 },
    #[error("feature_names lists {names} columns but n_features is {expected}")]
    FeatureNameCount { names: usize, expected: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ModelLoadError> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err(ModelLoadError::EmptyTree { tree });
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|len| *len != nodes)
        {
            return Err(ModelLoadError::RaggedArrays { tree });
        }

        for node in 0..nodes {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF {
                continue;
            }
            // Children must point forward so traversal always terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(ModelLoadError::ChildOutOfRange { tree, node, child });
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(ModelLoadError::FeatureOutOfRange {
                    tree,
                    node,
                    feature,
                });
            }
        }
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0_usize;
        while self.children_left[node] != LEAF {
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// Serialized form of the fitted forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestExport {
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub trees: Vec<DecisionTree>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestModel {
    n_features: usize,
    feature_names: Option<Vec<String>>,
    trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    pub fn from_export(export: ForestExport) -> Result<Self, ModelLoadError> {
        if export.n_features == 0 {
            return Err(ModelLoadError::NoFeatures);
        }
        if export.trees.is_empty() {
            return Err(ModelLoadError::NoTrees);
        }
        if let Some(names) = &export.feature_names {
            if names.len() != export.n_features {
                return Err(ModelLoadError::FeatureNameCount {
                    names: names.len(),
                    expected: export.n_features,
                });
            }
        }
        for (idx, tree) in export.trees.iter().enumerate() {
            tree.validate(idx, export.n_features)?;
        }

        Ok(Self {
            n_features: export.n_features,
            feature_names: export.feature_names,
            trees: export.trees,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

impl Regressor for RandomForestModel {
    fn predict(&self, row: &EncodedRow<'_>) -> Result<f64, PredictionError> {
        if row.len() != self.n_features {
            return Err(PredictionError::new(format!(
                "X has {} features, but RandomForestRegressor is expecting {} features as input.",
                row.len(),
                self.n_features
            )));
        }

        if let Some(names) = &self.feature_names {
            let columns = row.schema().columns();
            if let Some((idx, (seen, fitted))) = columns
                .iter()
                .zip(names.iter())
                .enumerate()
                .find(|(_, (seen, fitted))| seen != fitted)
            {
                return Err(PredictionError::new(format!(
                    "The feature names should match those that were passed during fit. \
                     Column {idx} is `{seen}`, expected `{fitted}`."
                )));
            }
        }

        let values = row.values();
        let total: f64 = self.trees.iter().map(|tree| tree.predict(values)).sum();
        let estimate = total / self.trees.len() as f64;

        if !estimate.is_finite() {
            return Err(PredictionError::new(format!(
                "model produced a non-finite estimate ({estimate})"
            )));
        }
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{encode, City, FeatureSchema, ItinerarySelection, TravelClass};

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            "duration".into(),
            "days_left".into(),
            "class_Economy".into(),
        ])
        .unwrap()
    }

    /// Splits on class first, then on duration (business) or days left (economy).
    fn class_tree() -> DecisionTree {
        DecisionTree {
            children_left: vec![1, 3, 5, -1, -1, -1, -1],
            children_right: vec![2, 4, 6, -1, -1, -1, -1],
            feature: vec![2, 0, 1, -2, -2, -2, -2],
            threshold: vec![0.5, 10.0, 15.5, -2.0, -2.0, -2.0, -2.0],
            value: vec![0.0, 0.0, 0.0, 45000.0, 60000.0, 9000.0, 5000.0],
        }
    }

    fn stump(value: f64) -> DecisionTree {
        DecisionTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    fn forest(trees: Vec<DecisionTree>) -> RandomForestModel {
        RandomForestModel::from_export(ForestExport {
            n_features: 3,
            feature_names: None,
            trees,
        })
        .unwrap()
    }

    fn selection(class: TravelClass, duration: f64, days_left: u8) -> ItinerarySelection {
        ItinerarySelection {
            source_city: City::Delhi,
            destination_city: City::Mumbai,
            travel_class: class,
            duration_hours: duration,
            days_left,
            ..ItinerarySelection::default()
        }
    }

    #[test]
    fn traversal_goes_left_on_equal_threshold() {
        let schema = schema();
        let model = forest(vec![class_tree()]);

        let row = encode(&selection(TravelClass::Business, 10.0, 30), &schema);
        assert_eq!(model.predict(&row), Ok(45000.0));

        let row = encode(&selection(TravelClass::Business, 10.5, 30), &schema);
        assert_eq!(model.predict(&row), Ok(60000.0));

        let row = encode(&selection(TravelClass::Economy, 2.0, 15), &schema);
        assert_eq!(model.predict(&row), Ok(9000.0));

        let row = encode(&selection(TravelClass::Economy, 2.0, 16), &schema);
        assert_eq!(model.predict(&row), Ok(5000.0));
    }

    #[test]
    fn forest_averages_its_trees() {
        let schema = schema();
        let model = forest(vec![class_tree(), stump(7000.0)]);
        let row = encode(&selection(TravelClass::Economy, 2.0, 20), &schema);
        assert_eq!(model.predict(&row), Ok(6000.0));
        assert_eq!(model.tree_count(), 2);
    }

    #[test]
    fn width_mismatch_is_a_prediction_error() {
        let schema = FeatureSchema::new(vec!["duration".into(), "days_left".into()]).unwrap();
        let model = forest(vec![stump(1.0)]);
        let row = encode(&selection(TravelClass::Economy, 2.0, 20), &schema);
        let err = model.predict(&row).unwrap_err();
        assert!(err.to_string().starts_with("X has 2 features"));
    }

    #[test]
    fn feature_name_mismatch_is_a_prediction_error() {
        let model = RandomForestModel::from_export(ForestExport {
            n_features: 3,
            feature_names: Some(vec![
                "duration".into(),
                "days_left".into(),
                "class_Business".into(),
            ]),
            trees: vec![stump(1.0)],
        })
        .unwrap();
        let schema = schema();
        let row = encode(&selection(TravelClass::Economy, 2.0, 20), &schema);
        let err = model.predict(&row).unwrap_err();
        assert!(err.to_string().contains("`class_Economy`, expected `class_Business`"));
    }

    #[test]
    fn non_finite_leaf_is_a_prediction_error() {
        let schema = schema();
        let model = forest(vec![stump(f64::INFINITY)]);
        let row = encode(&selection(TravelClass::Economy, 2.0, 20), &schema);
        assert!(model.predict(&row).is_err());
    }

    #[test]
    fn malformed_exports_are_rejected() {
        let mut ragged = class_tree();
        ragged.value.pop();
        let err = RandomForestModel::from_export(ForestExport {
            n_features: 3,
            feature_names: None,
            trees: vec![ragged],
        })
        .unwrap_err();
        assert_eq!(err, ModelLoadError::RaggedArrays { tree: 0 });

        let mut cyclic = class_tree();
        cyclic.children_left[1] = 0;
        let err = RandomForestModel::from_export(ForestExport {
            n_features: 3,
            feature_names: None,
            trees: vec![stump(1.0), cyclic],
        })
        .unwrap_err();
        assert_eq!(
            err,
            ModelLoadError::ChildOutOfRange {
                tree: 1,
                node: 1,
                child: 0
            }
        );

        let err = RandomForestModel::from_export(ForestExport {
            n_features: 2,
            feature_names: None,
            trees: vec![class_tree()],
        })
        .unwrap_err();
        assert_eq!(
            err,
            ModelLoadError::FeatureOutOfRange {
                tree: 0,
                node: 0,
                feature: 2
            }
        );

        let err = RandomForestModel::from_export(ForestExport {
            n_features: 3,
            feature_names: None,
            trees: Vec::new(),
        })
        .unwrap_err();
        assert_eq!(err, ModelLoadError::NoTrees);
    }

    #[test]
    fn export_decodes_from_json() {
        let json = r#"{
            "n_features": 3,
            "trees": [{
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [4321.5]
            }]
        }"#;
        let export: ForestExport = serde_json::from_str(json).unwrap();
        assert!(export.feature_names.is_none());
        let model = RandomForestModel::from_export(export).unwrap();
        assert_eq!(model.n_features(), 3);
    }
}
