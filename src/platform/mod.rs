//! Platform abstraction layer
//!
//! Browser-only pieces. Native builds and tests use
//! [`crate::persistence::MemoryStore`] instead.

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStore;
