use crate::types::Timestamp;

/// Source of datum timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
