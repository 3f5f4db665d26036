// Last-known job state, readable after the producing context is gone

use std::sync::{Arc, Mutex};

use super::models::JobState;

/// Context-scoped store holding the current job's last emitted state.
///
/// One store exists per target context, created at process start and
/// injected into the reporter. All writes come from the single active
/// job, so last-writer-wins is safe. Observers that attach late read
/// `current()` instead of waiting for the next push.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<Mutex<JobState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(JobState::idle())),
        }
    }

    /// Snapshot of the most recent state.
    pub fn current(&self) -> JobState {
        self.inner.lock().unwrap().clone()
    }

    pub fn set(&self, state: JobState) {
        *self.inner.lock().unwrap() = state;
    }

    /// Reset to the idle state (new context / job boundary).
    pub fn reset(&self) {
        self.set(JobState::idle());
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
