//! Cooperative cancellation and progress reporting.
//!
//! Long-running components take a `&TaskProgress` and poll it between
//! iterations. Callers may cancel from another thread and read the progress
//! fraction at any time. A canceled run returns [`TaskOutcome::Canceled`] and
//! its partial result is dropped.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared progress and cancellation state for one running task
#[derive(Debug, Default)]
pub struct TaskProgress {
    total: AtomicUsize,
    processed: AtomicUsize,
    canceled: AtomicBool,
}

impl TaskProgress {
    /// Create a fresh, not-canceled progress state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observed at the next poll
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called
    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    /// Reset the counters for a new phase of work
    pub fn start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.processed.store(0, Ordering::Relaxed);
    }

    /// Record `n` processed items
    #[inline]
    pub fn advance(&self, n: usize) {
        self.processed.fetch_add(n, Ordering::Relaxed);
    }

    /// Number of items processed in the current phase
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// Fraction of work done, or `None` while the total is unknown (zero)
    pub fn fraction(&self) -> Option<f64> {
        let total = self.total.load(Ordering::Relaxed);
        if total == 0 {
            return None;
        }
        let done = self.processed.load(Ordering::Relaxed).min(total);
        Some(done as f64 / total as f64)
    }
}

/// Result of a cancellable computation
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T> {
    /// The task ran to completion
    Finished(T),
    /// The task observed a cancellation request; no result is available
    Canceled,
}

impl<T> TaskOutcome<T> {
    /// Returns the finished value, or `None` if canceled
    pub fn finished(self) -> Option<T> {
        match self {
            TaskOutcome::Finished(value) => Some(value),
            TaskOutcome::Canceled => None,
        }
    }

    /// Returns true if the task was canceled
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskOutcome::Canceled)
    }

    /// Map the finished value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TaskOutcome<U> {
        match self {
            TaskOutcome::Finished(value) => TaskOutcome::Finished(f(value)),
            TaskOutcome::Canceled => TaskOutcome::Canceled,
        }
    }
}

/// A (row, sample) cell or table that could not be processed.
///
/// Failures are collected for the caller to report; processing continues with
/// the remaining items.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ItemFailure {
    /// Table the item belongs to
    pub table: String,
    /// Row id, if the failure concerns a single row
    pub row_id: Option<u32>,
    /// Sample name, if the failure concerns a single sample
    pub sample: Option<String>,
    /// Human-readable reason
    pub reason: String,
}
