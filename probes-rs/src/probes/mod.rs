//! Concrete probes built on the active and passive machinery.

pub mod altitude;
pub mod battery;

pub use altitude::{altitude_probe, pressure_to_feet, AltitudeConverter};
pub use battery::{battery_probe, BatteryPoller};
