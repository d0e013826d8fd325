use std::sync::Arc;

use common::{
    AcquisitionError, BatteryGauge, Clock, Datum, DatumPayload, DatumStore, ProbeError, SensorType,
};

use crate::active::{ActiveProbe, Poller};

/// Polls the charge level of the device battery.
pub struct BatteryPoller {
    gauge: Arc<dyn BatteryGauge>,
}

impl BatteryPoller {
    pub fn new(gauge: Arc<dyn BatteryGauge>) -> Self {
        Self { gauge }
    }
}

impl Poller for BatteryPoller {
    fn initialize(&mut self, probe: &str) -> Result<(), ProbeError> {
        if !self.gauge.is_present() {
            return Err(ProbeError::UnsupportedHardware {
                probe: probe.to_string(),
                sensor_type: SensorType::Other("battery".to_string()),
            });
        }
        Ok(())
    }

    fn poll(&mut self, clock: &dyn Clock) -> Result<Datum, AcquisitionError> {
        // gauges report a negative level when the charge is unknown
        let level = match self.gauge.level() {
            Some(level) if level >= 0.0 => level,
            _ => return Err(AcquisitionError::NoReading("battery level unknown".to_string())),
        };
        if !level.is_finite() || level > 1.0 {
            return Err(AcquisitionError::Malformed(format!("battery level {level}")));
        }
        Ok(Datum::new(clock.now(), DatumPayload::Battery { level }))
    }
}

/// Active probe reporting the battery level.
pub fn battery_probe(
    gauge: Arc<dyn BatteryGauge>,
    store: Arc<dyn DatumStore>,
    clock: Arc<dyn Clock>,
) -> ActiveProbe {
    ActiveProbe::new("Battery", Box::new(BatteryPoller::new(gauge)), store, clock)
}
