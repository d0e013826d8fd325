use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::sensors::SensorType;

/// Handle to a physical sensor, as returned by a hardware sensor source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sensor {
    id: Uuid,
    sensor_type: SensorType,
    name: String,
}

impl Sensor {
    pub fn new(sensor_type: SensorType, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sensor_type,
            name: name.to_string(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sensor_type(&self) -> &SensorType {
        &self.sensor_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
