pub mod clock;
pub mod gauge;
pub mod source;
pub mod store;

pub use crate::traits::clock::Clock;
pub use crate::traits::gauge::BatteryGauge;
pub use crate::traits::source::{HardwareSensorSource, ListenerId, SensorListener};
pub use crate::traits::store::DatumStore;
