//! Workout record model
//!
//! Pure data: no storage or platform dependencies live here.

pub mod id;
pub mod workout;

pub use id::WorkoutId;
pub use workout::{
    Activity, ActivityInput, Cycling, LatLng, Running, Workout, WorkoutKind, describe,
};
