//! The workout log session
//!
//! [`WorkoutLog`] is the one application context: it owns the ordered
//! in-memory collection and the store, and writes the whole collection
//! back after every change. It is built once at startup and handed to the
//! UI layer; there is no global state.

use crate::error::{LogError, Result, StorageError};
use crate::input::{WorkoutForm, check_coords};
use crate::model::{LatLng, Workout};
use crate::persistence::{self, KeyValueStore};
use crate::settings::Settings;
use crate::view::WorkoutView;

/// Workout collection plus its backing store
#[derive(Debug)]
pub struct WorkoutLog<S: KeyValueStore> {
    store: S,
    settings: Settings,
    workouts: Vec<Workout>,
}

impl<S: KeyValueStore> WorkoutLog<S> {
    /// Empty log over `store`. Call [`WorkoutLog::load`] to read prior data.
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            store,
            settings,
            workouts: Vec::new(),
        }
    }

    /// Open a log and load whatever is stored.
    ///
    /// Corrupt or unreachable storage does not stop the app: the log starts
    /// empty and the error is handed back alongside it.
    pub fn open(store: S, settings: Settings) -> (Self, Option<StorageError>) {
        let mut workout_log = Self::new(store, settings);
        let err = workout_log.load().err();
        if let Some(e) = &err {
            log::warn!("Starting with an empty log: {}", e);
        }
        (workout_log, err)
    }

    /// Replace the in-memory collection with the stored one.
    ///
    /// Returns the number of workouts loaded. On error the collection is
    /// left empty.
    pub fn load(&mut self) -> std::result::Result<usize, StorageError> {
        self.workouts.clear();
        self.workouts = persistence::load_workouts(&self.store, &self.settings.storage_key)?;
        Ok(self.workouts.len())
    }

    /// Validate the form and log a workout at `coords`.
    ///
    /// When a workout is marked as being edited, the new one takes its
    /// place in the list and the old one is dropped.
    pub fn submit(&mut self, coords: LatLng, form: &WorkoutForm) -> Result<&Workout> {
        let coords = check_coords(coords).inspect_err(|e| {
            log::warn!("Rejected workout position: {}", e);
        })?;
        let request = form.parse().inspect_err(|e| {
            log::warn!("Rejected workout input: {}", e);
        })?;
        let workout = request.into_workout(coords);

        let mut next = self.workouts.clone();
        let index = match next.iter().position(Workout::is_edited) {
            Some(i) => {
                log::info!(
                    "Replacing edited workout {} with {}",
                    next[i].id(),
                    workout.id()
                );
                next[i] = workout;
                i
            }
            None => {
                next.push(workout);
                next.len() - 1
            }
        };

        self.commit(next)?;
        Ok(&self.workouts[index])
    }

    /// Look up a workout by id
    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// The user picked a workout from the list: count the visit
    pub fn select(&mut self, id: &str) -> Result<&Workout> {
        let index = self.index_of(id)?;
        let mut next = self.workouts.clone();
        next[index].record_interaction();
        log::debug!(
            "Workout {} selected ({} visits)",
            id,
            next[index].interaction_count()
        );
        self.commit(next)?;
        Ok(&self.workouts[index])
    }

    /// Mark a workout as being edited. The next submitted workout
    /// replaces it.
    pub fn begin_edit(&mut self, id: &str) -> Result<()> {
        let index = self.index_of(id)?;
        let mut next = self.workouts.clone();
        for (i, w) in next.iter_mut().enumerate() {
            w.set_edited(i == index);
        }
        self.commit(next)
    }

    /// Drop any pending edit mark
    pub fn cancel_edit(&mut self) -> Result<()> {
        if !self.workouts.iter().any(Workout::is_edited) {
            return Ok(());
        }
        let mut next = self.workouts.clone();
        for w in &mut next {
            w.set_edited(false);
        }
        self.commit(next)
    }

    /// Forget every workout, in memory and in storage
    pub fn reset(&mut self) -> Result<()> {
        persistence::clear_workouts(&mut self.store, &self.settings.storage_key)?;
        self.workouts.clear();
        Ok(())
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Render data for every workout, in list order
    pub fn views(&self) -> Vec<WorkoutView> {
        self.workouts.iter().map(WorkoutView::from).collect()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist the settings. A changed storage key takes
    /// effect on the next write; existing data is not moved.
    pub fn set_settings(&mut self, settings: Settings) {
        settings.save(&mut self.store);
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| LogError::NotFound(id.to_string()))
    }

    /// Write `next` to the store, and only then adopt it. A failed write
    /// leaves the in-memory list as it was.
    fn commit(&mut self, next: Vec<Workout>) -> Result<()> {
        persistence::save_workouts(&mut self.store, &self.settings.storage_key, &next)?;
        self.workouts = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CorruptStorage, InputError};
    use crate::model::WorkoutKind;
    use crate::persistence::MemoryStore;

    fn madrid() -> LatLng {
        LatLng::new(40.0, -3.7)
    }

    /// Reads like a [`MemoryStore`], refuses writes once `full` is set
    #[derive(Debug, Default)]
    struct FullStore {
        inner: MemoryStore,
        full: bool,
    }

    impl KeyValueStore for FullStore {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if self.full {
                return Err(StorageError::Write("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    /// A log holding one run whose store rejects every further write
    fn full_log() -> (WorkoutLog<FullStore>, String) {
        let mut log = WorkoutLog::new(FullStore::default(), Settings::default());
        let id = log
            .submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap()
            .id()
            .to_string();
        log.store.full = true;
        (log, id)
    }

    fn stored_blob<S: KeyValueStore>(log: &WorkoutLog<S>) -> Option<String> {
        log.store().get("workouts").unwrap()
    }

    fn new_log() -> WorkoutLog<MemoryStore> {
        WorkoutLog::new(MemoryStore::new(), Settings::default())
    }

    /// Reopen a log over the same stored data
    fn reopen(log: &WorkoutLog<MemoryStore>) -> WorkoutLog<MemoryStore> {
        let (reopened, err) = WorkoutLog::open(log.store().clone(), Settings::default());
        assert!(err.is_none());
        reopened
    }

    #[test]
    fn test_submit_appends_and_persists() {
        let mut log = new_log();
        log.submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap();
        log.submit(madrid(), &WorkoutForm::cycling("20", "60", "150"))
            .unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.workouts()[0].kind(), WorkoutKind::Running);
        assert_eq!(log.workouts()[1].kind(), WorkoutKind::Cycling);
        assert!(log.store().contains_key("workouts"));

        let reopened = reopen(&log);
        assert_eq!(reopened.workouts(), log.workouts());
    }

    #[test]
    fn test_invalid_submit_changes_nothing() {
        let mut log = new_log();
        let err = log
            .submit(madrid(), &WorkoutForm::running("5", "0", "178"))
            .unwrap_err();
        assert!(matches!(
            err,
            LogError::Input(InputError::NotPositive {
                field: "duration",
                ..
            })
        ));
        assert!(log.is_empty());
        assert!(!log.store().contains_key("workouts"));
    }

    #[test]
    fn test_submit_rejects_invalid_coords() {
        let mut log = new_log();
        log.submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap();
        let before = stored_blob(&log);

        let err = log
            .submit(
                LatLng::new(f64::NAN, -3.7),
                &WorkoutForm::running("5", "30", "178"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LogError::Input(InputError::InvalidCoords { .. })
        ));
        assert_eq!(log.len(), 1);
        assert_eq!(stored_blob(&log), before);
        assert_eq!(reopen(&log).len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_memory_and_storage_in_step() {
        let (mut log, id) = full_log();
        let before = stored_blob(&log);

        let err = log
            .submit(madrid(), &WorkoutForm::cycling("20", "60", "150"))
            .unwrap_err();
        assert!(matches!(err, LogError::Storage(StorageError::Write(_))));
        assert_eq!(log.len(), 1);

        assert!(log.select(&id).is_err());
        assert_eq!(log.find(&id).unwrap().interaction_count(), 0);

        assert!(log.begin_edit(&id).is_err());
        assert!(!log.find(&id).unwrap().is_edited());

        assert_eq!(stored_blob(&log), before);
    }

    #[test]
    fn test_failed_cancel_keeps_edit_mark() {
        let (mut log, id) = full_log();
        log.store.full = false;
        log.begin_edit(&id).unwrap();
        log.store.full = true;

        assert!(log.cancel_edit().is_err());
        assert!(log.find(&id).unwrap().is_edited());
    }

    #[test]
    fn test_select_counts_visits_and_survives_reload() {
        let mut log = new_log();
        let id = log
            .submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap()
            .id()
            .to_string();

        log.select(&id).unwrap();
        let selected = log.select(&id).unwrap();
        assert_eq!(selected.interaction_count(), 2);

        let reopened = reopen(&log);
        assert_eq!(reopened.find(&id).unwrap().interaction_count(), 2);
    }

    #[test]
    fn test_select_unknown_id() {
        let mut log = new_log();
        assert!(matches!(log.select("nope"), Err(LogError::NotFound(_))));
        assert!(log.find("nope").is_none());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut log = new_log();
        let first = log
            .submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap()
            .id()
            .to_string();
        let second = log
            .submit(madrid(), &WorkoutForm::running("8", "45", "175"))
            .unwrap()
            .id()
            .to_string();

        log.begin_edit(&first).unwrap();
        assert!(log.find(&first).unwrap().is_edited());

        let replacement = log
            .submit(madrid(), &WorkoutForm::cycling("20", "60", "150"))
            .unwrap()
            .id()
            .to_string();

        assert_eq!(log.len(), 2);
        assert!(log.find(&first).is_none());
        assert_eq!(log.workouts()[0].id().as_str(), replacement);
        assert_eq!(log.workouts()[1].id().as_str(), second);
        assert!(log.workouts().iter().all(|w| !w.is_edited()));
    }

    #[test]
    fn test_only_one_edit_mark() {
        let mut log = new_log();
        let a = log
            .submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap()
            .id()
            .to_string();
        let b = log
            .submit(madrid(), &WorkoutForm::running("8", "45", "175"))
            .unwrap()
            .id()
            .to_string();

        log.begin_edit(&a).unwrap();
        log.begin_edit(&b).unwrap();
        assert!(!log.find(&a).unwrap().is_edited());
        assert!(log.find(&b).unwrap().is_edited());

        log.cancel_edit().unwrap();
        assert!(log.workouts().iter().all(|w| !w.is_edited()));
        assert!(matches!(log.begin_edit("missing"), Err(LogError::NotFound(_))));
    }

    #[test]
    fn test_reset_clears_storage() {
        let mut log = new_log();
        log.submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap();
        log.reset().unwrap();

        assert!(log.is_empty());
        assert!(!log.store().contains_key("workouts"));
        assert!(reopen(&log).is_empty());
    }

    #[test]
    fn test_open_corrupt_storage_starts_empty() {
        let store = MemoryStore::with_entry("workouts", "definitely not json");
        let (log, err) = WorkoutLog::open(store, Settings::default());
        assert!(log.is_empty());
        assert!(matches!(
            err,
            Some(StorageError::Corrupt(CorruptStorage::Parse(_)))
        ));
    }

    #[test]
    fn test_custom_storage_key() {
        let settings = Settings {
            storage_key: "my_workouts".into(),
            ..Settings::default()
        };
        let mut log = WorkoutLog::new(MemoryStore::new(), settings);
        log.submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap();
        assert!(log.store().contains_key("my_workouts"));
        assert!(!log.store().contains_key("workouts"));
    }

    #[test]
    fn test_set_settings_persists() {
        let mut log = new_log();
        log.set_settings(Settings {
            map_zoom_level: 10,
            ..Settings::default()
        });
        assert_eq!(log.settings().map_zoom_level, 10);
        assert_eq!(Settings::load(log.store()).map_zoom_level, 10);
    }

    #[test]
    fn test_views_follow_list_order() {
        let mut log = new_log();
        log.submit(madrid(), &WorkoutForm::running("5", "30", "178"))
            .unwrap();
        log.submit(madrid(), &WorkoutForm::cycling("20", "60", "150"))
            .unwrap();
        let views = log.views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].popup_class, "running-popup");
        assert_eq!(views[1].popup_class, "cycling-popup");
    }
}
