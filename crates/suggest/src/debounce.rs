use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ScheduledTask;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Coalesces bursts of `schedule` calls into one callback invocation.
///
/// Every `schedule` supersedes the pending one; only the last value reaches
/// the callback, once the quiet period has elapsed uninterrupted. Dropping
/// the scheduler cancels whatever is pending.
///
/// The callback runs under the scheduler's lock, so it must not call back
/// into the same scheduler.
pub struct DebounceScheduler<T> {
    quiet_period: Duration,
    callback: Callback<T>,
    state: Arc<Mutex<DebounceState>>,
}

#[derive(Default)]
struct DebounceState {
    generation: u64,
    pending: Option<ScheduledTask>,
}

impl DebounceState {
    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
    }
}

fn lock(state: &Mutex<DebounceState>) -> MutexGuard<'_, DebounceState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl<T: Send + 'static> DebounceScheduler<T> {
    pub fn new<F>(quiet_period: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            quiet_period,
            callback: Arc::new(callback),
            state: Arc::new(Mutex::new(DebounceState::default())),
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arm the timer for `value`, cancelling any pending invocation.
    pub fn schedule(&self, value: T) {
        let mut state = lock(&self.state);
        state.cancel();
        let generation = state.generation;

        let shared = Arc::clone(&self.state);
        let callback = Arc::clone(&self.callback);
        state.pending = Some(ScheduledTask::after(self.quiet_period, move || {
            // Held through the callback: once `cancel` or `drop` returns, no
            // superseded callback is running or can start.
            let guard = lock(&shared);
            if guard.generation != generation {
                debug!("debounce: dropping superseded generation {generation}");
                return;
            }
            callback(value);
            drop(guard);
        }));
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        lock(&self.state).cancel();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.state)
            .pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<T> Drop for DebounceScheduler<T> {
    fn drop(&mut self) {
        lock(&self.state).cancel();
    }
}
