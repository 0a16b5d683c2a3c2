//! JavaScript bindings
//!
//! The Leaflet map and the DOM stay in JavaScript. They create one
//! [`WorkoutApp`] at startup and call into it on form submit, list click,
//! edit and reset. Render data crosses the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::error::LogError;
use crate::input::WorkoutForm;
use crate::logbook::WorkoutLog;
use crate::model::LatLng;
use crate::platform::LocalStore;
use crate::settings::Settings;
use crate::view::WorkoutView;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn view_json(view: &WorkoutView) -> Result<String, JsValue> {
    serde_json::to_string(view).map_err(to_js)
}

#[wasm_bindgen]
pub struct WorkoutApp {
    log: WorkoutLog<LocalStore>,
    load_error: Option<String>,
}

#[wasm_bindgen]
impl WorkoutApp {
    /// Open LocalStorage and load saved workouts.
    ///
    /// Only throws when LocalStorage itself is unusable. Corrupt saved data
    /// leaves the log empty; check `loadError`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WorkoutApp, JsValue> {
        let store = LocalStore::open().map_err(to_js)?;
        let settings = Settings::load(&store);
        let (log, err) = WorkoutLog::open(store, settings);
        Ok(WorkoutApp {
            log,
            load_error: err.map(|e| e.to_string()),
        })
    }

    /// Why the saved workouts could not be loaded, if they could not
    #[wasm_bindgen(getter = loadError)]
    pub fn load_error(&self) -> Option<String> {
        self.load_error.clone()
    }

    #[wasm_bindgen(getter = mapZoomLevel)]
    pub fn map_zoom_level(&self) -> u8 {
        self.log.settings().map_zoom_level
    }

    #[wasm_bindgen(setter = mapZoomLevel)]
    pub fn set_map_zoom_level(&mut self, level: u8) {
        let settings = Settings {
            map_zoom_level: level,
            ..self.log.settings().clone()
        };
        self.log.set_settings(settings);
    }

    /// Leaflet popup options as JSON
    #[wasm_bindgen(js_name = popupOptions)]
    pub fn popup_options(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.log.settings().popup).map_err(to_js)
    }

    #[wasm_bindgen(getter = formResetDelayMs)]
    pub fn form_reset_delay_ms(&self) -> u32 {
        self.log.settings().form_reset_delay_ms
    }

    /// Log a workout from the raw form values. Returns its view as JSON.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        lat: f64,
        lng: f64,
        kind: String,
        distance: String,
        duration: String,
        cadence: String,
        elevation: String,
    ) -> Result<String, JsValue> {
        let form = WorkoutForm {
            kind,
            distance,
            duration,
            cadence,
            elevation,
        };
        let workout = self.log.submit(LatLng::new(lat, lng), &form).map_err(to_js)?;
        view_json(&WorkoutView::from(workout))
    }

    /// A list entry was clicked. Returns the workout's view as JSON, or
    /// `undefined` for an unknown id.
    pub fn select(&mut self, id: &str) -> Result<Option<String>, JsValue> {
        match self.log.select(id) {
            Ok(workout) => view_json(&WorkoutView::from(workout)).map(Some),
            Err(LogError::NotFound(_)) => Ok(None),
            Err(e) => Err(to_js(e)),
        }
    }

    #[wasm_bindgen(js_name = beginEdit)]
    pub fn begin_edit(&mut self, id: &str) -> Result<(), JsValue> {
        self.log.begin_edit(id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) -> Result<(), JsValue> {
        self.log.cancel_edit().map_err(to_js)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.load_error = None;
        self.log.reset().map_err(to_js)
    }

    /// All workouts as a JSON array of views, in list order
    pub fn views(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.log.views()).map_err(to_js)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
