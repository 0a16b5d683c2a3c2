//! Workout records and their derived metrics
//!
//! A [`Workout`] carries the fields shared by every record plus an
//! [`Activity`] holding the type-specific input and the metric derived
//! from it. Derived values are computed exactly once, at construction.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::WorkoutId;

/// Map position as `[latitude, longitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }

    /// Finite, with latitude within ±90 and longitude within ±180
    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && self.0.abs() <= 90.0
            && self.1.abs() <= 180.0
    }
}

/// Workout type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Tag as stored and as used in CSS class names
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized tag used in descriptions
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" => Some(WorkoutKind::Running),
            "cycling" => Some(WorkoutKind::Cycling),
            _ => None,
        }
    }
}

/// Type-specific input supplied when a workout is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityInput {
    /// Steps per minute
    Running { cadence: f64 },
    /// Metres climbed
    Cycling { elevation_gain: f64 },
}

impl ActivityInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            ActivityInput::Running { .. } => WorkoutKind::Running,
            ActivityInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Running-specific data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Running {
    cadence: f64,
    pace: f64,
}

impl Running {
    fn new(distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        Self {
            cadence,
            pace: duration_min / distance_km,
        }
    }

    pub fn cadence(&self) -> f64 {
        self.cadence
    }

    /// Minutes per kilometre
    pub fn pace(&self) -> f64 {
        self.pace
    }
}

/// Cycling-specific data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycling {
    elevation_gain: f64,
    speed: f64,
}

impl Cycling {
    fn new(distance_km: f64, duration_min: f64, elevation_gain: f64) -> Self {
        Self {
            elevation_gain,
            // Kept as the web app has always computed it.
            speed: distance_km / duration_min / 60.0,
        }
    }

    pub fn elevation_gain(&self) -> f64 {
        self.elevation_gain
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// The variant part of a workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Running(Running),
    Cycling(Cycling),
}

impl Activity {
    fn build(distance_km: f64, duration_min: f64, input: ActivityInput) -> Self {
        match input {
            ActivityInput::Running { cadence } => {
                Activity::Running(Running::new(distance_km, duration_min, cadence))
            }
            ActivityInput::Cycling { elevation_gain } => {
                Activity::Cycling(Cycling::new(distance_km, duration_min, elevation_gain))
            }
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running(_) => WorkoutKind::Running,
            Activity::Cycling(_) => WorkoutKind::Cycling,
        }
    }
}

/// A single logged workout
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: LatLng,
    distance_km: f64,
    duration_min: f64,
    description: String,
    clicks: u32,
    edited: bool,
    activity: Activity,
}

impl Workout {
    /// Log a run at the current time
    pub fn running(coords: LatLng, distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        Self::create(
            coords,
            distance_km,
            duration_min,
            ActivityInput::Running { cadence },
        )
    }

    /// Log a ride at the current time
    pub fn cycling(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::create(
            coords,
            distance_km,
            duration_min,
            ActivityInput::Cycling { elevation_gain },
        )
    }

    /// Log a workout of either type at the current time
    pub fn create(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        input: ActivityInput,
    ) -> Self {
        Self::create_at(Utc::now(), coords, distance_km, duration_min, input)
    }

    /// Log a workout with an explicit creation time and a fresh id.
    ///
    /// Inputs are not validated here; see [`crate::input`].
    pub fn create_at(
        created_at: DateTime<Utc>,
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        input: ActivityInput,
    ) -> Self {
        Self::assemble(
            WorkoutId::generate(created_at),
            created_at,
            coords,
            distance_km,
            duration_min,
            input,
        )
    }

    /// Rebuild a stored workout through the normal construction path,
    /// keeping its identity and interaction state.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        input: ActivityInput,
        clicks: u32,
        edited: bool,
    ) -> Self {
        let mut workout = Self::assemble(id, created_at, coords, distance_km, duration_min, input);
        workout.clicks = clicks;
        workout.edited = edited;
        workout
    }

    fn assemble(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        input: ActivityInput,
    ) -> Self {
        let local_date = created_at.with_timezone(&Local).date_naive();
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            description: describe(input.kind(), local_date),
            clicks: 0,
            edited: false,
            activity: Activity::build(distance_km, duration_min, input),
        }
    }

    /// Register a visit (e.g. the entry was selected on the map)
    pub fn record_interaction(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }

    pub fn set_edited(&mut self, edited: bool) {
        self.edited = edited;
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> LatLng {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.clicks
    }

    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Minutes per kilometre, for runs
    pub fn pace(&self) -> Option<f64> {
        match &self.activity {
            Activity::Running(r) => Some(r.pace()),
            Activity::Cycling(_) => None,
        }
    }

    /// Derived speed, for rides
    pub fn speed(&self) -> Option<f64> {
        match &self.activity {
            Activity::Cycling(c) => Some(c.speed()),
            Activity::Running(_) => None,
        }
    }

    /// The input this workout was built from
    pub fn input(&self) -> ActivityInput {
        match &self.activity {
            Activity::Running(r) => ActivityInput::Running {
                cadence: r.cadence(),
            },
            Activity::Cycling(c) => ActivityInput::Cycling {
                elevation_gain: c.elevation_gain(),
            },
        }
    }
}

/// Label such as "Running on March 15"
pub fn describe(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {}", kind.label(), date.format("%B %-d"))
}
