//! Itinerary attributes collected by the prediction form.
//!
//! Option labels are spelled exactly as the one-hot columns of the training
//! data, so `label()` doubles as the column suffix used by the encoder.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Bounds of the "days until departure" slider.
pub const DAYS_LEFT_MIN: u8 = 0;
pub const DAYS_LEFT_MAX: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} option: {value}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

macro_rules! form_options {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|option| option.label()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label() == value)
                    .ok_or_else(|| UnknownOption {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }
    };
}

form_options! {
    /// Carrier operating the flight.
    Airline, "airline" {
        AirIndia => "Air_India",
        GoFirst => "GO_FIRST",
        Indigo => "Indigo",
        SpiceJet => "SpiceJet",
        Vistara => "Vistara",
    }
}

form_options! {
    City, "city" {
        Chennai => "Chennai",
        Delhi => "Delhi",
        Hyderabad => "Hyderabad",
        Kolkata => "Kolkata",
        Mumbai => "Mumbai",
    }
}

form_options! {
    /// Time-of-day bucket used for both departure and arrival.
    TimeOfDay, "time of day" {
        EarlyMorning => "Early_Morning",
        Evening => "Evening",
        LateNight => "Late_Night",
        Morning => "Morning",
        Night => "Night",
    }
}

form_options! {
    Stops, "stops" {
        Zero => "zero",
        TwoOrMore => "two_or_more",
    }
}

form_options! {
    TravelClass, "class" {
        Economy => "Economy",
        Business => "Business",
    }
}

/// Current state of the prediction form.
#[derive(Clone, Debug, PartialEq)]
pub struct ItinerarySelection {
    pub airline: Airline,
    pub source_city: City,
    pub destination_city: City,
    pub departure_time: TimeOfDay,
    pub arrival_time: TimeOfDay,
    pub stops: Stops,
    pub travel_class: TravelClass,
    /// Flight duration in hours. May hold NaN when the field does not parse.
    pub duration_hours: f64,
    pub days_left: u8,
}

impl Default for ItinerarySelection {
    fn default() -> Self {
        Self {
            airline: Airline::AirIndia,
            source_city: City::Chennai,
            destination_city: City::Chennai,
            departure_time: TimeOfDay::EarlyMorning,
            arrival_time: TimeOfDay::EarlyMorning,
            stops: Stops::Zero,
            travel_class: TravelClass::Economy,
            duration_hours: 2.0,
            days_left: 30,
        }
    }
}

impl ItinerarySelection {
    pub fn set_days_left(&mut self, days: i64) {
        self.days_left = days.clamp(i64::from(DAYS_LEFT_MIN), i64::from(DAYS_LEFT_MAX)) as u8;
    }

    pub fn route_label(&self) -> String {
        format!("{} → {}", self.source_city, self.destination_city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back_to_their_variant() {
        for airline in Airline::ALL {
            assert_eq!(airline.label().parse::<Airline>(), Ok(*airline));
        }
        assert_eq!("two_or_more".parse::<Stops>(), Ok(Stops::TwoOrMore));
    }

    #[test]
    fn unknown_label_reports_field() {
        let err = "Bangalore".parse::<City>().unwrap_err();
        assert_eq!(err.field, "city");
        assert_eq!(err.to_string(), "unknown city option: Bangalore");
    }

    #[test]
    fn defaults_follow_first_option_of_each_list() {
        let selection = ItinerarySelection::default();
        assert_eq!(selection.airline, Airline::ALL[0]);
        assert_eq!(selection.source_city, selection.destination_city);
        assert_eq!(selection.duration_hours, 2.0);
        assert_eq!(selection.days_left, 30);
        assert_eq!(selection.travel_class, TravelClass::Economy);
    }

    #[test]
    fn days_left_is_clamped_to_slider_range() {
        let mut selection = ItinerarySelection::default();
        selection.set_days_left(90);
        assert_eq!(selection.days_left, DAYS_LEFT_MAX);
        selection.set_days_left(-3);
        assert_eq!(selection.days_left, DAYS_LEFT_MIN);
    }
}
