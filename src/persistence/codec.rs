//! Flat JSON codec for the workout collection
//!
//! Each workout becomes one flat object. Field names match the blob the
//! web app has always written (`coords`, `distance`, `duration`, `type`,
//! `elevationGain`, `clicks`, ...) so existing browser data still loads.
//!
//! Decoding rebuilds every workout through the normal constructor path:
//! stored `pace`, `speed` and `description` are written for readers of the
//! raw blob but never trusted on the way back in. Any bad entry rejects the
//! whole batch.
//!
//! Restoring is as lenient as the web app's form was: a stored ride may
//! carry a negative elevation gain, even though new input cannot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CorruptStorage;
use crate::model::{Activity, ActivityInput, LatLng, Workout, WorkoutId, WorkoutKind};

/// One workout as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkout {
    pub id: String,
    /// Creation time, RFC 3339
    pub date: String,
    pub coords: LatLng,
    /// Kilometres
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(default)]
    pub edited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for StoredWorkout {
    fn from(w: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match w.activity() {
            Activity::Running(r) => (Some(r.cadence()), Some(r.pace()), None, None),
            Activity::Cycling(c) => (None, None, Some(c.elevation_gain()), Some(c.speed())),
        };
        Self {
            id: w.id().to_string(),
            date: w.created_at().to_rfc3339(),
            coords: w.coords(),
            distance: w.distance_km(),
            duration: w.duration_min(),
            kind: w.kind().as_str().to_string(),
            description: w.description().to_string(),
            clicks: w.interaction_count(),
            edited: w.is_edited(),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl StoredWorkout {
    /// Rebuild the typed workout. `index` is the entry's position in the
    /// blob, used for error reporting.
    pub fn into_workout(self, index: usize) -> Result<Workout, CorruptStorage> {
        let kind = WorkoutKind::from_str(&self.kind).ok_or_else(|| CorruptStorage::UnknownType {
            index,
            kind: self.kind.clone(),
        })?;

        let distance = positive(index, "distance", self.distance)?;
        let duration = positive(index, "duration", self.duration)?;

        let input = match kind {
            WorkoutKind::Running => {
                let cadence = self.cadence.ok_or(CorruptStorage::MissingField {
                    index,
                    field: "cadence",
                })?;
                ActivityInput::Running {
                    cadence: positive(index, "cadence", cadence)?,
                }
            }
            WorkoutKind::Cycling => {
                let elevation_gain = self.elevation_gain.ok_or(CorruptStorage::MissingField {
                    index,
                    field: "elevationGain",
                })?;
                if !elevation_gain.is_finite() {
                    return Err(CorruptStorage::InvalidValue {
                        index,
                        field: "elevationGain",
                        value: elevation_gain,
                    });
                }
                ActivityInput::Cycling { elevation_gain }
            }
        };

        let created_at = DateTime::parse_from_rfc3339(&self.date)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|_| CorruptStorage::InvalidDate {
                index,
                raw: self.date.clone(),
            })?;

        Ok(Workout::restore(
            WorkoutId::from(self.id),
            created_at,
            self.coords,
            distance,
            duration,
            input,
            self.clicks,
            self.edited,
        ))
    }
}

fn positive(index: usize, field: &'static str, value: f64) -> Result<f64, CorruptStorage> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CorruptStorage::InvalidValue {
            index,
            field,
            value,
        })
    }
}

/// Serialize the collection, preserving order.
///
/// JSON has no NaN or infinity and `serde_json` would write them as
/// `null`, which could never be read back. A workout off the map is
/// refused instead.
pub fn encode(workouts: &[Workout]) -> Result<String, serde_json::Error> {
    if let Some(bad) = workouts.iter().find(|w| !w.coords().is_valid()) {
        return Err(serde::ser::Error::custom(format!(
            "workout {} has invalid coords [{}, {}]",
            bad.id(),
            bad.coords().lat(),
            bad.coords().lng()
        )));
    }
    let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
    serde_json::to_string(&stored)
}

/// Rebuild the collection from a stored blob.
///
/// `None` (nothing stored) and a stored JSON `null` both yield an empty
/// collection.
pub fn decode(blob: Option<&str>) -> Result<Vec<Workout>, CorruptStorage> {
    let Some(blob) = blob else {
        return Ok(Vec::new());
    };

    let entries: Option<Vec<Value>> = serde_json::from_str(blob)?;
    let Some(entries) = entries else {
        return Ok(Vec::new());
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

fn decode_entry(index: usize, entry: Value) -> Result<Workout, CorruptStorage> {
    // Check the tag first so an unknown type is reported as such, even if
    // the rest of the entry has a different shape.
    match entry.get("type") {
        Some(Value::String(kind)) => {
            if WorkoutKind::from_str(kind).is_none() {
                return Err(CorruptStorage::UnknownType {
                    index,
                    kind: kind.clone(),
                });
            }
        }
        Some(other) => {
            return Err(CorruptStorage::UnknownType {
                index,
                kind: other.to_string(),
            });
        }
        None => {
            return Err(CorruptStorage::MissingField {
                index,
                field: "type",
            });
        }
    }

    let stored: StoredWorkout =
        serde_json::from_value(entry).map_err(|source| CorruptStorage::Shape { index, source })?;
    stored.into_workout(index)
}
