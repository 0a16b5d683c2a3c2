//! Save/load of the workout collection
//!
//! The whole collection lives under a single key as one JSON blob:
//! - Overwritten wholesale on every change
//! - Removed wholesale on reset
//! - Missing key means "no workouts yet", never an error
//! - Unreadable data is reported as corrupt, never silently dropped

pub mod codec;
pub mod store;

pub use codec::{StoredWorkout, decode, encode};
pub use store::{KeyValueStore, MemoryStore};

use crate::error::StorageError;
use crate::model::Workout;

/// Load all workouts stored under `key`
pub fn load_workouts<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Vec<Workout>, StorageError> {
    let blob = store.get(key)?;
    if blob.is_none() {
        log::info!("No stored workouts, starting fresh");
        return Ok(Vec::new());
    }

    let workouts = decode(blob.as_deref())?;
    log::info!("Loaded {} workouts", workouts.len());
    Ok(workouts)
}

/// Overwrite the stored collection under `key`
pub fn save_workouts<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    workouts: &[Workout],
) -> Result<(), StorageError> {
    let json = encode(workouts).map_err(StorageError::Encode)?;
    store.set(key, &json)?;
    log::info!("Workouts saved ({} entries)", workouts.len());
    Ok(())
}

/// Remove the stored collection under `key`
pub fn clear_workouts<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
) -> Result<(), StorageError> {
    store.remove(key)?;
    log::info!("Stored workouts cleared");
    Ok(())
}
