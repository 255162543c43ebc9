#[cfg(test)]
#[path = "../../tests/unit/termination/external_test.rs"]
mod external_test;

use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// A thread safe handle to request cooperative cancellation of a run from another thread.
///
/// The flag is polled by the run at epoch boundaries only: a long fitness evaluation is
/// never interrupted.
#[derive(Clone, Default)]
pub struct StopRequest {
    inner: Arc<StopState>,
}

#[derive(Default)]
struct StopState {
    requested: AtomicBool,
    finished: Mutex<bool>,
    finished_cvar: Condvar,
}

impl StopRequest {
    /// Creates a new instance of `StopRequest`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop at its next check point. Returns immediately.
    pub fn request_stop(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
    }

    /// Requests the run to stop and blocks until the run has observed the request and
    /// finished. Returns immediately without leaving a request behind if the run has
    /// already finished.
    pub fn request_stop_and_wait(&self) {
        let finished = self.lock_finished();
        if *finished {
            return;
        }

        self.request_stop();
        let _finished = self.inner.finished_cvar.wait_while(finished, |finished| !*finished);
    }

    /// Same as [`request_stop_and_wait`](Self::request_stop_and_wait) but gives up after the
    /// timeout. Returns true if the run has finished in time.
    pub fn request_stop_and_wait_timeout(&self, timeout: Duration) -> bool {
        let finished = self.lock_finished();
        if *finished {
            return true;
        }

        self.request_stop();
        match self.inner.finished_cvar.wait_timeout_while(finished, timeout, |finished| !*finished) {
            Ok((finished, _)) => *finished,
            Err(poisoned) => *poisoned.into_inner().0,
        }
    }

    /// Returns true if stop was requested.
    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Returns true if the run observing this request has finished.
    pub fn is_finished(&self) -> bool {
        *self.lock_finished()
    }

    /// Marks the run as finished and consumes a request it has honoured.
    fn acknowledge(&self) {
        let mut finished = self.lock_finished();
        self.clear();
        *finished = true;
        self.inner.finished_cvar.notify_all();
    }

    fn rearm(&self) {
        *self.lock_finished() = false;
    }

    /// Withdraws a stop request, e.g. before reusing the handle for another run.
    pub fn clear(&self) {
        self.inner.requested.store(false, Ordering::SeqCst);
    }

    fn lock_finished(&self) -> MutexGuard<'_, bool> {
        self.inner.finished.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A stop condition which fires when stop is requested through a [`StopRequest`] handle.
///
/// A request honoured by a finished run is consumed, so the next run starts clean. Reset does
/// not withdraw a pending request: a request made before the run has started terminates the
/// run at its first check point.
pub struct ExternalStop {
    request: StopRequest,
}

impl ExternalStop {
    /// Creates a new instance of `ExternalStop` observing the given request handle.
    pub fn new(request: StopRequest) -> Self {
        Self { request }
    }

    /// Returns a request handle.
    pub fn request(&self) -> StopRequest {
        self.request.clone()
    }
}

impl StopCondition for ExternalStop {
    fn name(&self) -> &str {
        "external-request"
    }

    fn is_termination(&mut self, _: &RunStatistics) -> bool {
        self.request.is_requested()
    }

    fn estimate(&self, _: &RunStatistics) -> Float {
        0.
    }

    fn reset(&mut self) {
        self.request.rearm();
    }

    fn on_run_finished(&mut self) {
        self.request.acknowledge();
    }
}
