//! Per-job tunables, progress reporting and cooperative cancellation
//!
//! All mutable job state lives in [`JobContext`], threaded by reference
//! through the pocketing operations. Progress and the abort flag sit behind
//! a cloneable [`ProgressHandle`] so an observer may poll completion or
//! request cancellation while a call runs on another thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use kerf_core::POINT_TOLERANCE;

/// Shared view of a job's progress and abort flag
///
/// Values are advisory; loads and stores use relaxed ordering.
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    done: Arc<AtomicU64>,
    abort: Arc<AtomicBool>,
}

impl ProgressHandle {
    /// Completion in percent, 0 to 100.
    pub fn done(&self) -> f64 {
        f64::from_bits(self.done.load(Ordering::Relaxed))
    }

    /// Request cancellation; the running job returns at its next poll.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    pub(crate) fn set_done(&self, value: f64) {
        self.done.store(value.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn add_done(&self, increment: f64) {
        self.set_done(self.done() + increment);
    }
}

/// Tunables and bookkeeping for one pocketing job
#[derive(Debug, Clone)]
pub struct JobContext {
    /// World scale; coincidence tolerances scale as `0.002 / units`.
    pub units: f64,
    /// Arc fitting tolerance in user units.
    pub accuracy: f64,
    /// Refit arcs over emitted toolpath curves.
    pub fit_arcs: bool,
    progress: ProgressHandle,
    /// Share of the 100% budget owned by the area currently processed.
    pub(crate) single_area_processing_length: f64,
    pub(crate) split_processing_length: f64,
    pub(crate) set_processing_length_in_split: bool,
}

impl JobContext {
    pub fn new() -> Self {
        Self {
            units: 1.0,
            accuracy: 0.01,
            fit_arcs: false,
            progress: ProgressHandle::default(),
            single_area_processing_length: 100.0,
            split_processing_length: 0.0,
            set_processing_length_in_split: false,
        }
    }

    /// Cloneable handle for polling progress or requesting cancellation.
    pub fn handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    /// Point coincidence tolerance at the job's unit scale.
    pub fn point_tolerance(&self) -> f64 {
        POINT_TOLERANCE / self.units
    }

    pub fn aborted(&self) -> bool {
        self.progress.aborted()
    }

    pub(crate) fn set_progress(&self, value: f64) {
        self.progress.set_done(value);
    }

    pub(crate) fn add_progress(&self, increment: f64) {
        self.progress.add_done(increment);
    }
}

impl Default for JobContext {
    fn default() -> Self {
        Self::new()
    }
}
