// Fault boundaries around acquisition and storage. Errors and panics raised
// inside are logged and counted, never propagated to the loop or thread that
// called in.

use log::warn;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use common::{AcquisitionError, Datum, DatumStore, StoreError};

use crate::stats::ProbeStats;

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub(crate) fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

/// Runs one acquisition step. Returns `None` if it failed.
pub(crate) fn acquire<T>(
    probe: &str,
    stats: &ProbeStats,
    f: impl FnOnce() -> Result<T, AcquisitionError>,
) -> Option<T> {
    let result = catch_panic(f).unwrap_or_else(|message| Err(AcquisitionError::Panicked(message)));
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            stats.acquisition_failed();
            warn!("Failed to acquire datum for probe \"{probe}\": {e}");
            None
        }
    }
}

/// Hands a datum over to the store. Returns false if it was dropped.
pub(crate) fn store_datum(
    probe: &str,
    store: &dyn DatumStore,
    stats: &ProbeStats,
    datum: Datum,
) -> bool {
    let result = catch_panic(|| store.store(datum))
        .unwrap_or_else(|message| Err(StoreError::Panicked(message)));
    match result {
        Ok(()) => {
            stats.stored();
            true
        }
        Err(e) => {
            stats.store_failed();
            warn!("Failed to store datum of probe \"{probe}\": {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{DatumPayload, Timestamp};
    use test_utils::sinks::{StoreMock, StoreMode};

    fn battery_datum() -> Datum {
        Datum::new(Timestamp::from_secs(1.0), DatumPayload::Battery { level: 0.9 })
    }

    #[test]
    fn test_acquire_success() {
        let stats = ProbeStats::default();
        assert_eq!(acquire("Test", &stats, || Ok(42)), Some(42));
        assert_eq!(stats.snapshot().acquisition_failures, 0);
    }

    #[test]
    fn test_acquire_error_is_counted() {
        let stats = ProbeStats::default();
        let result: Option<u8> = acquire("Test", &stats, || {
            Err(AcquisitionError::NoReading("sensor asleep".to_string()))
        });
        assert!(result.is_none());
        assert_eq!(stats.snapshot().acquisition_failures, 1);
    }

    #[test]
    fn test_acquire_panic_is_contained() {
        let stats = ProbeStats::default();
        let result: Option<u8> = acquire("Test", &stats, || panic!("driver crashed"));
        assert!(result.is_none());
        assert_eq!(stats.snapshot().acquisition_failures, 1);
    }

    #[test]
    fn test_store_failure_is_independent_of_acquisition() {
        let stats = ProbeStats::default();
        let store = StoreMock::with_mode(StoreMode::Reject);
        assert!(!store_datum("Test", &store, &stats, battery_datum()));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.store_failures, 1);
        assert_eq!(snapshot.acquisition_failures, 0);
        assert_eq!(snapshot.stored, 0);
    }

    #[test]
    fn test_store_panic_is_contained() {
        let stats = ProbeStats::default();
        let store = StoreMock::with_mode(StoreMode::Panic);
        assert!(!store_datum("Test", &store, &stats, battery_datum()));
        assert_eq!(stats.snapshot().store_failures, 1);
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(catch_panic(|| panic!("boom")).unwrap_err(), "boom");
        assert_eq!(
            catch_panic(|| panic!("{} {}", "formatted", 1)).unwrap_err(),
            "formatted 1"
        );
    }
}
