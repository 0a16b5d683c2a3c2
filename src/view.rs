//! Render data for the map and the workout list
//!
//! No DOM code lives here, only the strings the UI layer needs.

use serde::Serialize;

use crate::model::{Activity, LatLng, Workout, WorkoutKind};

/// One value/unit row in a workout card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Everything needed to draw one workout as a marker and a list entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub title: String,
    pub coords: LatLng,
    /// CSS classes of the list entry
    pub list_class: String,
    /// Class name of the marker popup
    pub popup_class: String,
    pub details: Vec<Detail>,
}

impl WorkoutKind {
    /// Emoji shown next to the distance
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl From<&Workout> for WorkoutView {
    fn from(w: &Workout) -> Self {
        let kind = w.kind();
        let mut details = vec![
            Detail::new(kind.icon(), w.distance_km().to_string(), "km"),
            Detail::new("⏱", w.duration_min().to_string(), "min"),
        ];

        match w.activity() {
            Activity::Running(r) => {
                details.push(Detail::new("⚡️", format!("{:.1}", r.pace()), "min/km"));
                details.push(Detail::new("🦶🏼", r.cadence().to_string(), "spm"));
            }
            Activity::Cycling(c) => {
                details.push(Detail::new("⚡️", format!("{:.1}", c.speed()), "km/h"));
                details.push(Detail::new("⛰", c.elevation_gain().to_string(), "m"));
            }
        }

        Self {
            id: w.id().to_string(),
            kind,
            title: w.description().to_string(),
            coords: w.coords(),
            list_class: format!("workout workout--{}", kind.as_str()),
            popup_class: format!("{}-popup", kind.as_str()),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityInput;
    use chrono::{Local, TimeZone, Utc};

    fn at() -> chrono::DateTime<Utc> {
        Local
            .with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_running_view() {
        let run = Workout::create_at(
            at(),
            LatLng::new(40.0, -3.7),
            5.5,
            30.0,
            ActivityInput::Running { cadence: 178.0 },
        );
        let view = WorkoutView::from(&run);

        assert_eq!(view.id, run.id().to_string());
        assert_eq!(view.title, "Running on March 15");
        assert_eq!(view.list_class, "workout workout--running");
        assert_eq!(view.popup_class, "running-popup");

        let rows: Vec<_> = view
            .details
            .iter()
            .map(|d| (d.value.as_str(), d.unit))
            .collect();
        assert_eq!(
            rows,
            vec![("5.5", "km"), ("30", "min"), ("5.5", "min/km"), ("178", "spm")]
        );
    }

    #[test]
    fn test_cycling_view() {
        let ride = Workout::create_at(
            at(),
            LatLng::new(40.0, -3.7),
            20.0,
            60.0,
            ActivityInput::Cycling {
                elevation_gain: 150.0,
            },
        );
        let view = WorkoutView::from(&ride);

        assert_eq!(view.kind, WorkoutKind::Cycling);
        assert_eq!(view.popup_class, "cycling-popup");
        assert_eq!(view.details[0].icon, "🚴‍♀️");
        assert_eq!(view.details[2].value, "0.0");
        assert_eq!(view.details[2].unit, "km/h");
        assert_eq!(view.details[3].value, "150");
    }

    #[test]
    fn test_view_json_shape() {
        let ride = Workout::cycling(LatLng::new(1.0, 2.0), 20.0, 60.0, 0.0);
        let json = serde_json::to_value(WorkoutView::from(&ride)).unwrap();
        assert_eq!(json["type"], "cycling");
        assert_eq!(json["coords"], serde_json::json!([1.0, 2.0]));
        assert_eq!(json["details"][0]["unit"], "km");
    }
}
