//! Workout identifiers

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of trailing timestamp digits kept in an id
const TIMESTAMP_DIGITS: u32 = 10;

/// Opaque, unique workout identifier.
///
/// Fresh ids are the last ten digits of the creation time in milliseconds
/// followed by a random 32-bit hex suffix, so two workouts logged in the
/// same millisecond still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh id for a workout created at `created_at`
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis().rem_euclid(10_i64.pow(TIMESTAMP_DIGITS));
        let suffix: u32 = rand::random();
        Self(format!("{millis:010}{suffix:08x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for WorkoutId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
