use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Probe specific content of a [`Datum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatumPayload {
    /// Altitude in feet above standard sea level pressure.
    Altitude { feet: f64 },
    /// Remaining battery charge as a fraction in `[0, 1]`.
    Battery { level: f64 },
}

/// One timestamped measurement record produced by a probe.
///
/// A datum is built once per successful acquisition and handed over to the
/// store by value, the probe keeps no reference to it.
///
/// # Examples
///
/// ```
/// use common::{Datum, DatumPayload, Timestamp};
///
/// let datum = Datum::new(Timestamp::from_secs(10.0), DatumPayload::Battery { level: 0.5 });
/// assert_eq!(datum.timestamp().as_secs(), 10.0);
/// assert!(datum.accuracy().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    timestamp: Timestamp,
    accuracy: Option<f64>,
    payload: DatumPayload,
}

impl Datum {
    pub fn new(timestamp: Timestamp, payload: DatumPayload) -> Self {
        Self {
            timestamp,
            accuracy: None,
            payload,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    pub fn payload(&self) -> &DatumPayload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datum_with_accuracy() {
        let datum = Datum::new(
            Timestamp::from_secs(1.0),
            DatumPayload::Altitude { feet: 120.0 },
        )
        .with_accuracy(3.5);
        assert_eq!(datum.accuracy(), Some(3.5));
        assert_eq!(datum.payload(), &DatumPayload::Altitude { feet: 120.0 });
    }

    #[test]
    fn test_datum_serializes_payload_by_probe_kind() {
        let datum = Datum::new(Timestamp::from_secs(2.0), DatumPayload::Battery { level: 0.25 });
        let json = serde_json::to_value(&datum).unwrap();
        assert_eq!(json["payload"]["Battery"]["level"], 0.25);
        assert!(json["accuracy"].is_null());
    }
}
