//! General functionality shared by the probe crates
//!
//! Holds the data model (datum, probe states, delivery tiers, sensors) and the
//! interfaces of the collaborators a probe is constructed with: the hardware
//! sensor source, the datum store and the clock.

pub mod errors;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{
    BatteryGauge, Clock, DatumStore, HardwareSensorSource, ListenerId, SensorListener,
};

// Re-export types
#[doc(inline)]
pub use types::{
    Accuracy, Datum, DatumPayload, ProbeState, Sensor, SensorEvent, SensorTier, SensorType,
    SystemClock, Timestamp,
};

#[doc(inline)]
pub use errors::{AcquisitionError, ProbeError, StoreError};
