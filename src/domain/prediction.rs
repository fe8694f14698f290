use thiserror::Error;

use super::encoding::{encode, EncodedRow, FeatureSchema};
use super::itinerary::ItinerarySelection;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Anything that can turn one encoded row into a fare estimate.
pub trait Regressor {
    fn predict(&self, row: &EncodedRow<'_>) -> Result<f64, PredictionError>;
}

/// Failure raised by a [`Regressor`]; carries the diagnostic text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PredictionError(pub String);

impl PredictionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Source and destination cities cannot be the same.")]
    SameCity,
    #[error("Flight duration must be greater than 0.")]
    NonPositiveDuration,
}

pub fn validate(selection: &ItinerarySelection) -> Result<(), ValidationError> {
    if selection.source_city == selection.destination_city {
        return Err(ValidationError::SameCity);
    }
    // NaN from an unparsable field fails here as well.
    if !(selection.duration_hours > 0.0) {
        return Err(ValidationError::NonPositiveDuration);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Rejected(ValidationError),
    Failed { diagnostic: String },
    Estimated { price: f64 },
}

impl PredictionOutcome {
    pub fn level(&self) -> OutcomeLevel {
        match self {
            PredictionOutcome::Rejected(_) => OutcomeLevel::Warning,
            PredictionOutcome::Failed { .. } => OutcomeLevel::Error,
            PredictionOutcome::Estimated { .. } => OutcomeLevel::Success,
        }
    }

    pub fn headline(&self) -> String {
        match self {
            PredictionOutcome::Rejected(reason) => reason.to_string(),
            PredictionOutcome::Failed { .. } => "Error in prediction!".to_string(),
            PredictionOutcome::Estimated { price } => {
                format!("Estimated Flight Price: {}", format_price(*price))
            }
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Failed { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            PredictionOutcome::Estimated { price } => Some(*price),
            _ => None,
        }
    }
}

/// Runs the validation gate, then asks the regressor for exactly one estimate.
pub fn predict_price(
    selection: &ItinerarySelection,
    schema: &FeatureSchema,
    regressor: &dyn Regressor,
) -> PredictionOutcome {
    if let Err(reason) = validate(selection) {
        return reject(selection, reason);
    }
    estimate(selection, &encode(selection, schema), regressor)
}

pub fn reject(selection: &ItinerarySelection, reason: ValidationError) -> PredictionOutcome {
    tracing::warn!(route = %selection.route_label(), %reason, "prediction rejected");
    PredictionOutcome::Rejected(reason)
}

/// Calls the regressor once on an already encoded row of a validated selection.
pub fn estimate(
    selection: &ItinerarySelection,
    row: &EncodedRow<'_>,
    regressor: &dyn Regressor,
) -> PredictionOutcome {
    match regressor.predict(row).and_then(whole_price) {
        Ok(price) => {
            tracing::info!(
                airline = %selection.airline,
                route = %selection.route_label(),
                class = %selection.travel_class,
                price,
                "fare estimated"
            );
            PredictionOutcome::Estimated { price }
        }
        Err(err) => {
            tracing::error!(route = %selection.route_label(), error = %err, "prediction failed");
            PredictionOutcome::Failed {
                diagnostic: err.to_string(),
            }
        }
    }
}

/// An estimate must convert to a whole amount of rupees.
fn whole_price(price: f64) -> Result<f64, PredictionError> {
    if price.is_nan() {
        return Err(PredictionError::new("cannot convert float NaN to integer"));
    }
    if price.is_infinite() {
        return Err(PredictionError::new(
            "cannot convert float infinity to integer",
        ));
    }
    Ok(price)
}

/// Truncates toward zero and groups thousands, e.g. `5953.7` → `₹5,953`.
pub fn format_price(price: f64) -> String {
    let whole = price.trunc();
    let digits = format!("{:.0}", whole.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if whole < 0.0 { "-" } else { "" };
    format!("{CURRENCY_SYMBOL}{sign}{grouped}")
}
