use std::{fmt::Display, str::FromStr};

use dioxus::prelude::*;

use crate::{
    domain::{
        encode, estimate, reject, validate, Airline, AppState, City, ItinerarySelection, Stops,
        TimeOfDay, TravelClass, DAYS_LEFT_MAX, DAYS_LEFT_MIN,
    },
    infra::artifacts::ArtifactStatus,
    ui::components::{
        result_panel::ResultPanel,
        select_field::SelectField,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

#[component]
pub fn PredictPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let artifacts = use_context::<ArtifactStatus>();

    let snapshot = state();
    let selection = snapshot.selection.clone();
    let unavailable = match &artifacts {
        ArtifactStatus::Unavailable(reason) => Some(reason.clone()),
        ArtifactStatus::Ready(_) => None,
    };
    let can_predict = unavailable.is_none();

    let on_predict = move |_| {
        let Some(bundle) = artifacts.bundle() else {
            push_toast(toasts, ToastKind::Error, "Model artifacts are not loaded.");
            return;
        };
        let selection = state.with(|st| st.selection.clone());

        let outcome = match validate(&selection) {
            Err(reason) => reject(&selection, reason),
            Ok(()) => {
                let row = encode(&selection, &bundle.schema);
                if !row.unmatched().is_empty() {
                    push_toast(
                        toasts,
                        ToastKind::Warning,
                        format!(
                            "Unknown to the model, treated as 0: {}",
                            row.unmatched().join(", ")
                        ),
                    );
                }
                estimate(&selection, &row, &bundle.model)
            }
        };
        state.with_mut(|st| st.last_outcome = Some(outcome));
    };

    rsx! {
        div { class: "panel",
            p { class: "field-hint", "Fill in the details to get an estimated flight price." }

            div { class: "form-grid",
                SelectField {
                    label: "🛫 Airline",
                    options: Airline::labels(),
                    value: selection.airline.label(),
                    on_change: move |raw: String| update(state, &raw, |sel, v: Airline| sel.airline = v),
                }
                SelectField {
                    label: "🏙️ Destination City",
                    options: City::labels(),
                    value: selection.destination_city.label(),
                    on_change: move |raw: String| update(state, &raw, |sel, v: City| sel.destination_city = v),
                }
                SelectField {
                    label: "🌆 Source City",
                    options: City::labels(),
                    value: selection.source_city.label(),
                    on_change: move |raw: String| update(state, &raw, |sel, v: City| sel.source_city = v),
                }
                SelectField {
                    label: "🕓 Arrival Time",
                    options: TimeOfDay::labels(),
                    value: selection.arrival_time.label(),
                    on_change: move |raw: String| update(state, &raw, |sel, v: TimeOfDay| sel.arrival_time = v),
                }
                SelectField {
                    label: "🕒 Departure Time",
                    options: TimeOfDay::labels(),
                    value: selection.departure_time.label(),
                    on_change: move |raw: String| update(state, &raw, |sel, v: TimeOfDay| sel.departure_time = v),
                }
                SelectField {
                    label: "🛑 Number of Stops",
                    options: Stops::labels(),
                    value: selection.stops.label(),
                    on_change: move |raw: String| update(state, &raw, |sel, v: Stops| sel.stops = v),
                }
                div {
                    label { class: "field-label", "⏱️ Flight Duration (hours)" }
                    input {
                        class: "field-input",
                        r#type: "number",
                        min: "0",
                        step: "0.25",
                        value: "{snapshot.duration_input}",
                        oninput: move |evt: FormEvent| {
                            state.with_mut(|st| {
                                st.set_duration_input(evt.value());
                                st.last_outcome = None;
                            });
                        },
                    }
                }
                div {
                    label { class: "field-label", "📅 Days Until Departure: {selection.days_left}" }
                    input {
                        class: "field-input",
                        r#type: "range",
                        min: "{DAYS_LEFT_MIN}",
                        max: "{DAYS_LEFT_MAX}",
                        value: "{selection.days_left}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(days) = evt.value().parse::<i64>() {
                                state.with_mut(|st| st.edit(|sel| sel.set_days_left(days)));
                            }
                        },
                    }
                }
                div { class: "form-full",
                    SelectField {
                        label: "🎟️ Class",
                        options: TravelClass::labels(),
                        value: selection.travel_class.label(),
                        on_change: move |raw: String| update(state, &raw, |sel, v: TravelClass| sel.travel_class = v),
                    }
                }
            }

            div { class: "actions",
                button {
                    class: "btn-primary",
                    disabled: !can_predict,
                    onclick: on_predict,
                    "🔍 Predict Price"
                }
            }
        }

        if let Some(reason) = unavailable {
            div { class: "result-panel error",
                p { class: "result-headline", "⚠️ Model could not be loaded." }
                pre { class: "result-diagnostic", code { "{reason}" } }
            }
        }

        if let Some(outcome) = snapshot.last_outcome.clone() {
            ResultPanel { outcome }
        }
    }
}

fn update<T>(
    mut state: Signal<AppState>,
    raw: &str,
    apply: impl FnOnce(&mut ItinerarySelection, T),
) where
    T: FromStr,
    T::Err: Display,
{
    match raw.parse::<T>() {
        Ok(value) => state.with_mut(|st| st.edit(|sel| apply(sel, value))),
        Err(err) => tracing::warn!(error = %err, "ignoring form value"),
    }
}
