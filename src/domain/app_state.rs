use super::itinerary::ItinerarySelection;
use super::prediction::PredictionOutcome;

/// Per-session form state. Nothing here outlives the window.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub selection: ItinerarySelection,
    /// Raw text of the duration field, kept so partial input is not reformatted.
    pub duration_input: String,
    pub last_outcome: Option<PredictionOutcome>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let selection = ItinerarySelection::default();
        Self {
            duration_input: format!("{:.1}", selection.duration_hours),
            selection,
            last_outcome: None,
        }
    }

    pub fn set_duration_input(&mut self, raw: String) {
        self.selection.duration_hours = raw.trim().parse::<f64>().unwrap_or(f64::NAN);
        self.duration_input = raw;
    }

    /// Any edit invalidates the previously shown result.
    pub fn edit(&mut self, apply: impl FnOnce(&mut ItinerarySelection)) {
        apply(&mut self.selection);
        self.last_outcome = None;
    }
}
