//! Module errors

use thiserror::Error;

use crate::types::{ProbeState, SensorType};

/// Structural failures. These always surface to whoever drives the probe lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    /// The sensor a probe depends on is not present on the device.
    #[error("probe \"{probe}\": no sensor present for sensor type {sensor_type}")]
    UnsupportedHardware {
        probe: String,
        sensor_type: SensorType,
    },

    /// A lifecycle operation found the probe in an unexpected state.
    #[error("probe \"{probe}\": cannot move to {target:?}, expected {expected:?} but found {actual:?}")]
    InvalidStateTransition {
        probe: String,
        expected: ProbeState,
        actual: ProbeState,
        target: ProbeState,
    },

    /// The worker thread could not be spawned or terminated abnormally.
    #[error("probe \"{probe}\": worker thread failure: {reason}")]
    Worker { probe: String, reason: String },

    /// The listener of a passive probe could not be registered with its source.
    #[error("probe \"{probe}\": could not listen to {sensor_type}")]
    Registration {
        probe: String,
        sensor_type: SensorType,
    },
}

/// Raised by an acquisition step (poll or event conversion). Recovered locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcquisitionError {
    #[error("no reading available: {0}")]
    NoReading(String),

    #[error("malformed reading: {0}")]
    Malformed(String),

    #[error("acquisition panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

/// Raised by the datum store. Recovered locally, the datum is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store panicked: {0}")]
    Panicked(String),
}
