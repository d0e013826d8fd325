use crate::errors::StoreError;
use crate::types::Datum;

/// Sink receiving every datum a probe produces.
///
/// Called from probe worker threads and from sensor delivery threads, possibly
/// concurrently for different probes.
pub trait DatumStore: Send + Sync {
    fn store(&self, datum: Datum) -> Result<(), StoreError>;
}
