pub mod sensor;
pub mod sensor_event;
pub mod sensor_type;

pub use crate::types::sensors::sensor::Sensor;
pub use crate::types::sensors::sensor_event::{Accuracy, SensorEvent};
pub use crate::types::sensors::sensor_type::SensorType;
