pub mod clock;
pub mod datum;
pub mod probe_state;
pub mod sensor_tier;
pub mod sensors;

pub use clock::{SystemClock, Timestamp};
pub use datum::{Datum, DatumPayload};
pub use probe_state::ProbeState;
pub use sensor_tier::SensorTier;
pub use sensors::{Accuracy, Sensor, SensorEvent, SensorType};
