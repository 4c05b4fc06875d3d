//! One-time initialization gate.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::Result;

/// Progress of the one-time setup routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitState {
    /// Setup has not run yet, or the last attempt failed.
    Idle,
    /// A caller is currently running the setup routine.
    Running,
    /// Setup completed; every caller from now on skips it.
    Ready,
}

/// Runs a setup routine at most once to success across concurrent callers.
///
/// Callers arriving while a run is in flight block until it finishes and
/// observe the fully-initialized state. A failed or panicking run resets
/// the gate so a later caller retries the routine and surfaces its own
/// error; only a successful run latches the gate shut.
#[derive(Debug)]
pub struct InitGate {
    state: Mutex<InitState>,
    ready: Condvar,
}

impl Default for InitGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InitGate {
    /// An idle gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(InitState::Idle),
            ready: Condvar::new(),
        }
    }

    /// Whether the setup routine has already completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.lock_state() == InitState::Ready
    }

    /// Runs `setup` unless a previous call already succeeded.
    ///
    /// Returns `Ok(())` once the gate is ready — either because this caller
    /// ran the routine to success, or because another caller did. Returns
    /// the routine's error when the attempt this caller ended up running
    /// fails.
    pub fn ensure<F>(&self, setup: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let mut state = self.lock_state();
        loop {
            match *state {
                InitState::Ready => return Ok(()),
                InitState::Running => state = self.wait(state),
                InitState::Idle => break,
            }
        }
        *state = InitState::Running;
        drop(state);

        // The routine runs outside the lock. The guard reopens the gate if
        // the routine fails or panics, releasing blocked callers to retry.
        let reset = ResetGuard { gate: self };
        let outcome = setup();
        if outcome.is_ok() {
            std::mem::forget(reset);
            *self.lock_state() = InitState::Ready;
            self.ready.notify_all();
        }
        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, InitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, InitState>) -> MutexGuard<'a, InitState> {
        self.ready
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }
}

struct ResetGuard<'a> {
    gate: &'a InitGate,
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        *self.gate.lock_state() = InitState::Idle;
        self.gate.ready.notify_all();
    }
}
