use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the kinds of hardware sensors a source can expose.
///
/// # Examples
///
/// ```
/// use common::types::sensors::SensorType;
///
/// assert_eq!(SensorType::Pressure.to_string(), "pressure");
/// assert_eq!(SensorType::Other(String::from("battery")).to_string(), "battery");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Pressure,
    Light,
    Other(String),
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorType::Pressure => write!(f, "pressure"),
            SensorType::Light => write!(f, "light"),
            SensorType::Other(name) => write!(f, "{name}"),
        }
    }
}
