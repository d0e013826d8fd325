use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters of a probe's recoverable events.
///
/// Together with the `warn!` logs these are the only place where per-cycle
/// failures become visible; they never reach the caller's control flow.
#[derive(Debug, Default)]
pub struct ProbeStats {
    workers_spawned: AtomicU64,
    cycles: AtomicU64,
    stored: AtomicU64,
    acquisition_failures: AtomicU64,
    store_failures: AtomicU64,
    events_dropped: AtomicU64,
}

/// Point in time copy of [`ProbeStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub workers_spawned: u64,
    pub cycles: u64,
    pub stored: u64,
    pub acquisition_failures: u64,
    pub store_failures: u64,
    pub events_dropped: u64,
}

impl ProbeStats {
    pub(crate) fn worker_spawned(&self) {
        self.workers_spawned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn stored(&self) {
        self.stored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn acquisition_failed(&self) {
        self.acquisition_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn store_failed(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn event_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            workers_spawned: self.workers_spawned.load(Ordering::Relaxed),
            cycles: self.cycles.load(Ordering::Relaxed),
            stored: self.stored.load(Ordering::Relaxed),
            acquisition_failures: self.acquisition_failures.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
        }
    }
}
