use std::sync::Arc;

use common::{
    AcquisitionError, Clock, Datum, DatumPayload, DatumStore, HardwareSensorSource, SensorEvent,
    SensorType, Timestamp,
};

use crate::passive::{EventConverter, PassiveProbe};

/// Standard sea level pressure in hPa.
pub const STANDARD_PRESSURE_HPA: f64 = 1013.25;

const PRESSURE_EXPONENT: f64 = 0.190284;
const FEET_SCALE: f64 = 145366.45;

/// Pressure altitude in feet for a barometer reading in hPa.
///
/// ```
/// use probes_rs::probes::pressure_to_feet;
///
/// assert!(pressure_to_feet(1013.25).abs() < 1e-9);
/// assert!(pressure_to_feet(900.0) > 3000.0);
/// ```
pub fn pressure_to_feet(hpa: f64) -> f64 {
    (1.0 - (hpa / STANDARD_PRESSURE_HPA).powf(PRESSURE_EXPONENT)) * FEET_SCALE
}

/// Converts barometer events into altitude data.
#[derive(Debug, Default, Clone, Copy)]
pub struct AltitudeConverter;

impl EventConverter for AltitudeConverter {
    fn sensor_type(&self) -> SensorType {
        SensorType::Pressure
    }

    fn convert(&self, event: &SensorEvent, timestamp: Timestamp) -> Result<Datum, AcquisitionError> {
        let hpa = event
            .values()
            .first()
            .map(|value| *value as f64)
            .ok_or_else(|| AcquisitionError::NoReading("pressure event is empty".to_string()))?;
        if !hpa.is_finite() || hpa <= 0.0 {
            return Err(AcquisitionError::Malformed(format!("pressure {hpa} hPa")));
        }

        let feet = pressure_to_feet(hpa);
        Ok(Datum::new(timestamp, DatumPayload::Altitude { feet }))
    }
}

/// Passive probe reporting altitude from the device barometer.
pub fn altitude_probe(
    source: Arc<dyn HardwareSensorSource>,
    store: Arc<dyn DatumStore>,
    clock: Arc<dyn Clock>,
) -> PassiveProbe {
    PassiveProbe::new("Altitude", Arc::new(AltitudeConverter), source, store, clock)
}
