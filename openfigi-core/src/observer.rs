//! Fetch lifecycle hooks and pacing.
//!
//! The client never configures logging itself. Progress goes to a [`FetchObserver`]
//! and inter-batch delays go through a [`Pacer`], both injected at construction so
//! callers (and tests) decide what happens.

use crate::client::{BatchOutcome, FetchReport};
use std::time::Duration;
use tracing::{debug, info};

/// Progress callbacks for a fetch run. All methods default to no-ops.
pub trait FetchObserver: Send {
    /// Called when an enqueue was refused because the identifier kind is unknown.
    fn on_rejected(&self, _id_type: &str, _id_value: &str) {}

    /// Called before a batch is dispatched.
    fn on_batch_start(&self, _index: usize, _total: usize, _size: usize) {}

    /// Called once a batch has been reconciled (or has failed).
    fn on_batch_complete(&self, _outcome: &BatchOutcome) {}

    /// Called when the whole queue has been drained.
    fn on_fetch_complete(&self, _report: &FetchReport) {}
}

/// Observer that discards every event.
pub struct SilentObserver;

impl FetchObserver for SilentObserver {}

/// Observer that reports progress as `tracing` events.
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn on_batch_start(&self, index: usize, total: usize, size: usize) {
        debug!("[{}/{}] dispatching batch of {size} item(s)", index + 1, total);
    }

    /// Failures are already logged by the transport.
    fn on_batch_complete(&self, outcome: &BatchOutcome) {
        debug!(
            batch = outcome.index,
            published = outcome.published,
            "batch complete: {}",
            outcome.status
        );
    }

    fn on_fetch_complete(&self, report: &FetchReport) {
        info!(
            "fetch complete: {}/{} batch(es) succeeded, {} record(s)",
            report.succeeded_batches(),
            report.batches.len(),
            report.records.len()
        );
    }
}

/// Blocks between consecutive batches.
pub trait Pacer: Send {
    fn pause(&self, delay: Duration);
}

/// Sleeps the calling thread.
pub struct ThreadSleep;

impl Pacer for ThreadSleep {
    fn pause(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
