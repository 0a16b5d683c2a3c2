//! Logger settings and preferences
//!
//! Persisted separately from the workouts, under their own key.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::persistence::KeyValueStore;

/// Leaflet popup options for workout markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupOptions {
    pub min_width: u32,
    pub max_width: u32,
    /// Keep popups open when another one opens or the map is clicked
    pub stay_open: bool,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            min_width: 100,
            max_width: 250,
            stay_open: true,
        }
    }
}

/// Logger settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the workout collection is stored under
    pub storage_key: String,

    // === Map ===
    /// Zoom level used when centering on the user or a workout
    pub map_zoom_level: u8,
    /// Marker popup options
    pub popup: PopupOptions,

    // === Form ===
    /// Delay before the hidden form is laid out again (ms)
    pub form_reset_delay_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: consts::WORKOUTS_KEY.to_string(),
            map_zoom_level: consts::MAP_ZOOM_LEVEL,
            popup: PopupOptions::default(),
            form_reset_delay_ms: consts::FORM_RESET_DELAY_MS,
        }
    }
}

impl Settings {
    /// Key the settings themselves are stored under
    pub const STORAGE_KEY: &'static str = "workouts_settings";

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Ok(Some(json)) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        if let Ok(json) = serde_json::to_string(self) {
            match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.storage_key, "workouts");
        assert_eq!(settings.map_zoom_level, 13);
        assert_eq!(settings.popup.min_width, 100);
        assert_eq!(settings.popup.max_width, 250);
        assert!(settings.popup.stay_open);
        assert_eq!(settings.form_reset_delay_ms, 1000);
    }

    #[test]
    fn test_load_missing_uses_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, r#"{"map_zoom_level": 15}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.map_zoom_level, 15);
        assert_eq!(settings.storage_key, "workouts");
    }

    #[test]
    fn test_unreadable_settings_use_defaults() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, "][");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            map_zoom_level: 11,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }
}
