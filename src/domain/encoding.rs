//! One-hot encoding of an itinerary into the model's feature row.

use std::collections::HashMap;

use thiserror::Error;

use super::itinerary::{ItinerarySelection, TravelClass};

pub const DURATION_COLUMN: &str = "duration";
pub const DAYS_LEFT_COLUMN: &str = "days_left";
pub const ECONOMY_COLUMN: &str = "class_Economy";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column schema is empty")]
    Empty,
    #[error("column `{0}` appears more than once in the schema")]
    DuplicateColumn(String),
}

/// Ordered feature columns the model was fitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), position).is_some() {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// Dense feature row aligned to a [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow<'a> {
    schema: &'a FeatureSchema,
    values: Vec<f64>,
    unmatched: Vec<String>,
}

impl<'a> EncodedRow<'a> {
    pub fn schema(&self) -> &'a FeatureSchema {
        self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema.position(column).map(|idx| self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Columns implied by the selection that the schema does not contain.
    /// Their values were dropped, which leaves the indicator at 0.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }
}

fn indicator(prefix: &str, label: &str) -> String {
    format!("{prefix}_{label}")
}

/// Columns (and values) a selection populates before the zero-fill pass.
pub fn implied_columns(selection: &ItinerarySelection) -> Vec<(String, f64)> {
    let economy = if selection.travel_class == TravelClass::Economy {
        1.0
    } else {
        0.0
    };

    vec![
        (DURATION_COLUMN.to_string(), selection.duration_hours),
        (DAYS_LEFT_COLUMN.to_string(), f64::from(selection.days_left)),
        (indicator("airline", selection.airline.label()), 1.0),
        (indicator("source_city", selection.source_city.label()), 1.0),
        (
            indicator("destination_city", selection.destination_city.label()),
            1.0,
        ),
        (
            indicator("departure_time", selection.departure_time.label()),
            1.0,
        ),
        (indicator("arrival_time", selection.arrival_time.label()), 1.0),
        (indicator("stops", selection.stops.label()), 1.0),
        (ECONOMY_COLUMN.to_string(), economy),
    ]
}

pub fn encode<'a>(selection: &ItinerarySelection, schema: &'a FeatureSchema) -> EncodedRow<'a> {
    let mut values = vec![0.0; schema.len()];
    let mut unmatched = Vec::new();

    for (column, value) in implied_columns(selection) {
        match schema.position(&column) {
            Some(idx) => values[idx] = value,
            None => unmatched.push(column),
        }
    }

    if !unmatched.is_empty() {
        tracing::debug!(columns = ?unmatched, "selection implies columns missing from schema");
    }

    EncodedRow {
        schema,
        values,
        unmatched,
    }
}
