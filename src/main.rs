//! Workout Log entry point
//!
//! On the web this only sets up logging; the page script constructs a
//! `WorkoutApp` and drives it from the map. Natively it runs a short demo
//! against in-memory storage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Workout Log starting...");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Workout Log (native) starting...");
    log::info!("Native mode uses in-memory storage - build for wasm32 to use the map UI");

    if let Err(e) = demo() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Log two workouts, reload them from storage and print them
#[cfg(not(target_arch = "wasm32"))]
fn demo() -> Result<(), workout_log::LogError> {
    use workout_log::{LatLng, MemoryStore, Settings, WorkoutForm, WorkoutLog};

    let mut log = WorkoutLog::new(MemoryStore::new(), Settings::default());
    let madrid = LatLng::new(40.0, -3.7);
    log.submit(madrid, &WorkoutForm::running("5", "30", "178"))?;
    log.submit(madrid, &WorkoutForm::cycling("20", "60", "150"))?;

    let (reloaded, err) = WorkoutLog::open(log.store().clone(), Settings::default());
    if let Some(e) = err {
        return Err(e.into());
    }

    for view in reloaded.views() {
        let details: Vec<String> = view
            .details
            .iter()
            .map(|d| format!("{} {} {}", d.icon, d.value, d.unit))
            .collect();
        println!("{} [{}]: {}", view.title, view.id, details.join("  "));
    }
    Ok(())
}
