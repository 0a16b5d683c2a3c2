//! Form input parsing and validation
//!
//! The map layer hands over the form fields as raw strings. They are
//! checked here, before any workout is constructed.

use crate::error::InputError;
use crate::model::{ActivityInput, LatLng, Workout, WorkoutKind};

/// Raw values read from the new-workout form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    /// Only read for runs
    pub cadence: String,
    /// Only read for rides
    pub elevation: String,
}

/// A validated request to log a workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub distance_km: f64,
    pub duration_min: f64,
    pub input: ActivityInput,
}

impl WorkoutForm {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: WorkoutKind::Running.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: WorkoutKind::Cycling.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }

    /// Parse and validate the fields relevant to the selected type
    pub fn parse(&self) -> Result<NewWorkout, InputError> {
        let kind = WorkoutKind::from_str(&self.kind)
            .ok_or_else(|| InputError::UnknownKind(self.kind.clone()))?;

        let distance_km = positive("distance", parse_number("distance", &self.distance)?)?;
        let duration_min = positive("duration", parse_number("duration", &self.duration)?)?;

        let input = match kind {
            WorkoutKind::Running => ActivityInput::Running {
                cadence: positive("cadence", parse_number("cadence", &self.cadence)?)?,
            },
            WorkoutKind::Cycling => {
                let elevation_gain = parse_number("elevation", &self.elevation)?;
                if elevation_gain < 0.0 {
                    return Err(InputError::Negative {
                        field: "elevation",
                        value: elevation_gain,
                    });
                }
                ActivityInput::Cycling { elevation_gain }
            }
        };

        Ok(NewWorkout {
            distance_km,
            duration_min,
            input,
        })
    }
}

impl NewWorkout {
    /// Build the workout at the given map position
    pub fn into_workout(self, coords: LatLng) -> Workout {
        Workout::create(coords, self.distance_km, self.duration_min, self.input)
    }
}

/// Check a clicked map position before anything is built at it
pub fn check_coords(coords: LatLng) -> Result<LatLng, InputError> {
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(InputError::InvalidCoords {
            lat: coords.lat(),
            lng: coords.lng(),
        })
    }
}

/// Parse a finite number from a form field
fn parse_number(field: &'static str, raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field,
            raw: raw.to_string(),
        })
}

fn positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NotPositive { field, value })
    }
}
