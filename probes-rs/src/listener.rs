use log::{debug, trace, warn};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use common::{
    Accuracy, AcquisitionError, HardwareSensorSource, ListenerId, ProbeError, Sensor,
    SensorEvent, SensorListener, SensorTier, SensorType,
};

use crate::fault;
use crate::quantizer::quantize;
use crate::stats::ProbeStats;

pub type ValueChangedCallback =
    Box<dyn Fn(&SensorEvent) -> Result<(), AcquisitionError> + Send + Sync>;
pub type AccuracyChangedCallback = Box<dyn Fn(Accuracy) + Send + Sync>;

/// Tier used when no cadence was requested.
pub const DEFAULT_TIER: SensorTier = SensorTier::Normal;

#[derive(Default)]
struct Binding {
    sensor: Option<Sensor>,
    tier: Option<SensorTier>,
    listening: bool,
    registration: Option<ListenerId>,
}

/// Registration of one sensor listener with a push style source.
///
/// `start` and `stop` are idempotent. The listening flag, the bound sensor and
/// the registration id live under a single lock; event handlers hold it for
/// reading while they run, so once `stop` returns no callback is in flight and
/// none will start.
pub struct SensorListenerAdapter {
    probe: String,
    sensor_type: SensorType,
    source: Arc<dyn HardwareSensorSource>,
    value_changed: Option<ValueChangedCallback>,
    accuracy_changed: Option<AccuracyChangedCallback>,
    stats: Arc<ProbeStats>,
    binding: RwLock<Binding>,
}

impl SensorListenerAdapter {
    pub fn new(
        probe: &str,
        sensor_type: SensorType,
        source: Arc<dyn HardwareSensorSource>,
    ) -> Self {
        Self {
            probe: probe.to_string(),
            sensor_type,
            source,
            value_changed: None,
            accuracy_changed: None,
            stats: Arc::new(ProbeStats::default()),
            binding: RwLock::new(Binding::default()),
        }
    }

    pub fn on_value_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SensorEvent) -> Result<(), AcquisitionError> + Send + Sync + 'static,
    {
        self.value_changed = Some(Box::new(callback));
        self
    }

    pub fn on_accuracy_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(Accuracy) + Send + Sync + 'static,
    {
        self.accuracy_changed = Some(Box::new(callback));
        self
    }

    pub fn with_stats(mut self, stats: Arc<ProbeStats>) -> Self {
        self.stats = stats;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Binding> {
        self.binding.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Binding> {
        self.binding.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn sensor_type(&self) -> &SensorType {
        &self.sensor_type
    }

    /// Tier chosen at initialization, if any.
    pub fn tier(&self) -> Option<SensorTier> {
        self.read().tier
    }

    pub fn is_listening(&self) -> bool {
        self.read().listening
    }

    /// Looks up the sensor and computes the delivery tier for `cadence`.
    pub fn initialize(&self, cadence: Option<Duration>) -> Result<SensorTier, ProbeError> {
        let sensor = self.source.default_sensor(&self.sensor_type).ok_or_else(|| {
            ProbeError::UnsupportedHardware {
                probe: self.probe.clone(),
                sensor_type: self.sensor_type.clone(),
            }
        })?;
        let tier = cadence.map(quantize).unwrap_or(DEFAULT_TIER);
        debug!(
            "Probe \"{}\" bound to {} \"{}\" at {:?}",
            self.probe,
            self.sensor_type,
            sensor.name(),
            tier
        );

        let mut binding = self.write();
        binding.sensor = Some(sensor);
        binding.tier = Some(tier);
        Ok(tier)
    }

    /// Registers with the source unless already listening. Returns true if it registered.
    pub fn start(self: &Arc<Self>) -> bool {
        let mut binding = self.write();
        if binding.listening {
            return false;
        }
        let Some(sensor) = binding.sensor.clone() else {
            warn!("Probe \"{}\" has no sensor bound, not listening", self.probe);
            return false;
        };
        let tier = binding.tier.unwrap_or(DEFAULT_TIER);

        binding.listening = true;
        let listener: Arc<dyn SensorListener> = self.clone();
        binding.registration = Some(self.source.register_listener(listener, &sensor, tier));
        true
    }

    /// Unregisters from the source if listening. Returns true if it unregistered.
    pub fn stop(&self) -> bool {
        let mut binding = self.write();
        if !binding.listening {
            return false;
        }

        binding.listening = false;
        if let Some(id) = binding.registration.take() {
            self.source.unregister_listener(id);
        }
        true
    }
}

impl SensorListener for SensorListenerAdapter {
    fn on_sensor_changed(&self, event: &SensorEvent) {
        if !event.has_readings() {
            self.stats.event_dropped();
            trace!("Probe \"{}\" ignored event without readings", self.probe);
            return;
        }

        let binding = self.read();
        if !binding.listening {
            self.stats.event_dropped();
            return;
        }

        if let Some(callback) = self.value_changed.as_ref() {
            self.stats.cycle();
            fault::acquire(&self.probe, &self.stats, || callback(event));
        }
    }

    fn on_accuracy_changed(&self, _sensor: &Sensor, accuracy: Accuracy) {
        let binding = self.read();
        if !binding.listening {
            return;
        }

        if let Some(callback) = self.accuracy_changed.as_ref() {
            if let Err(message) = fault::catch_panic(|| callback(accuracy)) {
                warn!(
                    "Accuracy callback of probe \"{}\" failed: {message}",
                    self.probe
                );
            }
        }
    }
}
