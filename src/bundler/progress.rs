// Progress math and best-effort state fanout

use std::sync::Arc;

use super::models::JobState;
use super::state::StateStore;
use super::traits::StateObserver;

/// Fixed stage budget for the progress bar: fetching/adding assets
/// takes 0-70%, compression 70-95%, persisting the archive 95-100%.
pub const FETCH_STAGE_START: u8 = 0;
pub const FETCH_STAGE_WEIGHT: u8 = 70;
pub const COMPRESS_STAGE_START: u8 = 70;
pub const COMPRESS_STAGE_WEIGHT: u8 = 25;
pub const FINALIZE_STAGE_START: u8 = 95;
pub const FINALIZE_STAGE_WEIGHT: u8 = 5;

/// Map a stage-local completion fraction onto the overall 0-100 bar.
///
/// `fraction` is clamped to 0..=1 first, so a sloppy callback cannot
/// drag the bar backwards or past the stage budget.
pub fn compute_stage_percent(stage_start: u8, stage_weight: u8, fraction: f64) -> u8 {
    let fraction = fraction.clamp(0.0, 1.0);
    let raw = stage_start as f64 + fraction * stage_weight as f64;
    raw.round().clamp(0.0, 100.0) as u8
}

/// Writes each state to the store and fans it out to observers.
pub struct ProgressReporter {
    store: StateStore,
    observers: Vec<Arc<dyn StateObserver>>,
}

impl ProgressReporter {
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Record the state and notify observers. Delivery failures are
    /// swallowed: a torn-down popup must not fail the job.
    pub fn emit(&self, state: JobState) {
        self.store.set(state.clone());
        for observer in &self.observers {
            if let Err(e) = observer.on_state(&state) {
                eprintln!("[Progress] Observer unreachable: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::models::{JobStage, JobState};
    use std::sync::Mutex;

    struct Recorder {
        seen: Mutex<Vec<u8>>,
    }

    impl StateObserver for Recorder {
        fn on_state(&self, state: &JobState) -> Result<(), String> {
            self.seen.lock().unwrap().push(state.percent);
            Ok(())
        }
    }

    struct Unreachable;

    impl StateObserver for Unreachable {
        fn on_state(&self, _state: &JobState) -> Result<(), String> {
            Err("Could not establish connection".to_string())
        }
    }

    #[test]
    fn test_stage_percent_boundaries() {
        assert_eq!(compute_stage_percent(70, 25, 0.0), 70);
        assert_eq!(compute_stage_percent(70, 25, 1.0), 95);
        assert_eq!(compute_stage_percent(0, 70, 0.0), 0);
        assert_eq!(compute_stage_percent(0, 70, 1.0), 70);
        assert_eq!(compute_stage_percent(95, 5, 1.0), 100);
    }

    #[test]
    fn test_stage_percent_rounds_to_nearest() {
        // 0 + 0.5 * 70 = 35; 70 + 0.5 * 25 = 82.5 -> 83
        assert_eq!(compute_stage_percent(0, 70, 0.5), 35);
        assert_eq!(compute_stage_percent(70, 25, 0.5), 83);
    }

    #[test]
    fn test_stage_percent_clamps_fraction() {
        assert_eq!(compute_stage_percent(70, 25, -0.5), 70);
        assert_eq!(compute_stage_percent(70, 25, 1.7), 95);
    }

    #[test]
    fn test_emit_updates_store_and_observers() {
        let store = StateStore::new();
        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let mut reporter = ProgressReporter::new(store.clone());
        reporter.add_observer(recorder.clone());

        reporter.emit(JobState::in_progress(JobStage::Fetching, 35, "half".into()));

        assert_eq!(store.current().percent, 35);
        assert_eq!(*recorder.seen.lock().unwrap(), vec![35]);
    }

    #[test]
    fn test_unreachable_observer_is_swallowed() {
        let store = StateStore::new();
        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
        });
        let mut reporter = ProgressReporter::new(store.clone());
        reporter.add_observer(Arc::new(Unreachable));
        reporter.add_observer(recorder.clone());

        reporter.emit(JobState::complete("done".into()));

        // Store updated and the healthy observer still notified
        assert_eq!(store.current().percent, 100);
        assert_eq!(*recorder.seen.lock().unwrap(), vec![100]);
    }
}
