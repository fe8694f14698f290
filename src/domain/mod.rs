//! Fare prediction domain: form selections, feature encoding and the
//! validation gate around the regressor.

pub mod app_state;
pub mod encoding;
pub mod itinerary;
pub mod prediction;

pub use app_state::AppState;
pub use encoding::{encode, EncodedRow, FeatureSchema, SchemaError};
pub use itinerary::{
    Airline, City, ItinerarySelection, Stops, TimeOfDay, TravelClass, DAYS_LEFT_MAX,
    DAYS_LEFT_MIN,
};
pub use prediction::{
    estimate, format_price, predict_price, reject, validate, OutcomeLevel, PredictionError,
    PredictionOutcome, Regressor, ValidationError,
};
