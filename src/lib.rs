//! Workout Log - a map-based running and cycling logger
//!
//! Core modules:
//! - `model`: Workout records and their derived metrics
//! - `persistence`: Flat JSON codec and key-value storage
//! - `input`: Form parsing and validation
//! - `logbook`: The application context tying records to storage
//! - `view`: Render data for the map and the list
//! - `platform`: Browser LocalStorage backend
//! - `web`: JavaScript bindings

pub mod error;
pub mod input;
pub mod logbook;
pub mod model;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{CorruptStorage, InputError, LogError, StorageError};
pub use input::{NewWorkout, WorkoutForm, check_coords};
pub use logbook::WorkoutLog;
pub use model::{ActivityInput, LatLng, Workout, WorkoutId, WorkoutKind};
pub use persistence::{KeyValueStore, MemoryStore};
pub use settings::Settings;
pub use view::WorkoutView;

/// Logger configuration constants
pub mod consts {
    /// LocalStorage key holding the workout collection
    pub const WORKOUTS_KEY: &str = "workouts";
    /// Map zoom used when centering on the user or a workout
    pub const MAP_ZOOM_LEVEL: u8 = 13;
    /// Delay before the hidden form is laid out again (ms)
    pub const FORM_RESET_DELAY_MS: u32 = 1000;
}
