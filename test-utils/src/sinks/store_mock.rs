use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use common::{Datum, DatumStore, StoreError};

/// How a [`StoreMock`] answers `store` calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StoreMode {
    #[default]
    Accept,
    Reject,
    Panic,
}

/// Counting datum store.
///
/// Every call is counted on entry, before the optional delay, so a call that
/// is still in flight is already visible.
#[derive(Clone, Default)]
pub struct StoreMock {
    data: Arc<Mutex<Vec<Datum>>>,
    calls: Arc<AtomicUsize>,
    last_call: Arc<Mutex<Option<Instant>>>,
    mode: Arc<Mutex<StoreMode>>,
    delay: Option<Duration>,
}

impl StoreMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: StoreMode) -> Self {
        let store = Self::new();
        store.set_mode(mode);
        store
    }

    /// Every call sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_mode(&self, mode: StoreMode) {
        *self.mode.lock().unwrap() = mode;
    }

    /// Number of `store` calls, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Data that was accepted.
    pub fn data(&self) -> Vec<Datum> {
        self.data.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<Instant> {
        *self.last_call.lock().unwrap()
    }
}

impl DatumStore for StoreMock {
    fn store(&self, datum: Datum) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(Instant::now());

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        let mode = self.mode.lock().unwrap().clone();
        match mode {
            StoreMode::Accept => {
                self.data.lock().unwrap().push(datum);
                Ok(())
            }
            StoreMode::Reject => Err(StoreError::Unavailable("mock store rejects".to_string())),
            StoreMode::Panic => panic!("mock store panics"),
        }
    }
}
