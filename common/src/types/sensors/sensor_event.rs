use serde::{Deserialize, Serialize};

use crate::types::sensors::SensorType;

/// Reliability reported by a sensor for its readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accuracy {
    Unreliable,
    Low,
    Medium,
    High,
}

/// One pushed event from a hardware sensor source.
///
/// `values` holds the raw readings; their meaning depends on the sensor type
/// (e.g. `values[0]` is the pressure in hPa for [`SensorType::Pressure`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    sensor_type: SensorType,
    values: Vec<f32>,
    accuracy: Accuracy,
}

impl SensorEvent {
    pub fn new(sensor_type: SensorType, values: Vec<f32>, accuracy: Accuracy) -> Self {
        Self {
            sensor_type,
            values,
            accuracy,
        }
    }

    pub fn sensor_type(&self) -> &SensorType {
        &self.sensor_type
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    /// Returns true if the event carries at least one reading.
    pub fn has_readings(&self) -> bool {
        !self.values.is_empty()
    }
}
