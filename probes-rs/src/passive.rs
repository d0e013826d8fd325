use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use common::{
    Accuracy, AcquisitionError, Clock, Datum, DatumStore, HardwareSensorSource, ProbeError,
    ProbeState, SensorEvent, SensorTier, SensorType, Timestamp,
};

use crate::fault;
use crate::lifecycle::Lifecycle;
use crate::listener::SensorListenerAdapter;
use crate::stats::{ProbeStats, StatsSnapshot};

/// Turns a pushed sensor event into the probe's datum.
pub trait EventConverter: Send + Sync {
    /// Sensor whose events this converter understands.
    fn sensor_type(&self) -> SensorType;

    fn convert(&self, event: &SensorEvent, timestamp: Timestamp)
        -> Result<Datum, AcquisitionError>;

    /// Called when the sensor reports a new accuracy. Ignored by default.
    fn accuracy_changed(&self, _accuracy: Accuracy) {}
}

/// Probe fed by a push style hardware source.
///
/// Owns no thread: conversion and storage run on the source's delivery
/// thread. The store must not call back into `stop` of the same probe.
pub struct PassiveProbe {
    lifecycle: Lifecycle,
    listener: Arc<SensorListenerAdapter>,
    stats: Arc<ProbeStats>,
    // serializes initialize, start and stop
    transition: Mutex<()>,
}

impl PassiveProbe {
    pub fn new(
        name: &str,
        converter: Arc<dyn EventConverter>,
        source: Arc<dyn HardwareSensorSource>,
        store: Arc<dyn DatumStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let stats = Arc::new(ProbeStats::default());
        let sensor_type = converter.sensor_type();

        let value_changed = {
            let name = name.to_string();
            let converter = converter.clone();
            let stats = stats.clone();
            move |event: &SensorEvent| {
                let datum = converter.convert(event, clock.now())?;
                fault::store_datum(&name, store.as_ref(), &stats, datum);
                Ok(())
            }
        };

        let listener = SensorListenerAdapter::new(name, sensor_type, source)
            .on_value_changed(value_changed)
            .on_accuracy_changed(move |accuracy| converter.accuracy_changed(accuracy))
            .with_stats(stats.clone());

        Self {
            lifecycle: Lifecycle::new(name),
            listener: Arc::new(listener),
            stats,
            transition: Mutex::new(()),
        }
    }

    fn transition(&self) -> MutexGuard<'_, ()> {
        self.transition.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &str {
        self.lifecycle.name()
    }

    pub fn state(&self) -> ProbeState {
        self.lifecycle.state()
    }

    /// Delivery tier requested from the source, known once initialized.
    pub fn tier(&self) -> Option<SensorTier> {
        self.listener.tier()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Binds the sensor and quantizes `cadence` into a delivery tier.
    ///
    /// Fails with `UnsupportedHardware` (leaving the probe `Failed`) if the
    /// source has no sensor of the converter's type. A concurrent `start`
    /// waits until the binding is done.
    pub fn initialize(&self, cadence: Option<Duration>) -> Result<(), ProbeError> {
        let _transition = self.transition();
        self.lifecycle
            .change_state(ProbeState::Created, ProbeState::Initialized)?;

        match self.listener.initialize(cadence) {
            Ok(tier) => {
                debug!("Probe \"{}\" will listen at {:?}", self.name(), tier);
                Ok(())
            }
            Err(e) => {
                self.lifecycle
                    .change_state(ProbeState::Initialized, ProbeState::Failed)?;
                Err(e)
            }
        }
    }

    /// Moves the probe to `Started` and registers with the source.
    ///
    /// If the listener cannot be registered the probe ends up `Stopped` and
    /// `Registration` is returned.
    pub fn start(&self) -> Result<(), ProbeError> {
        let _transition = self.transition();
        self.lifecycle
            .change_state(ProbeState::Initialized, ProbeState::Started)?;

        if !self.listener.start() {
            self.lifecycle
                .change_state(ProbeState::Started, ProbeState::Stopping)?;
            self.lifecycle
                .change_state(ProbeState::Stopping, ProbeState::Stopped)?;
            return Err(ProbeError::Registration {
                probe: self.name().to_string(),
                sensor_type: self.listener.sensor_type().clone(),
            });
        }
        info!("Probe \"{}\" started", self.name());
        Ok(())
    }

    /// Unregisters from the source. Once this returns no event handler of the
    /// probe is running and no further datum will be stored.
    pub fn stop(&self) -> Result<(), ProbeError> {
        let _transition = self.transition();
        if !self.lifecycle.begin_stop() {
            debug!("Probe \"{}\" not running, nothing to stop", self.name());
            return Ok(());
        }

        self.listener.stop();
        self.lifecycle
            .change_state(ProbeState::Stopping, ProbeState::Stopped)?;
        info!("Probe \"{}\" stopped", self.name());
        Ok(())
    }
}

impl Drop for PassiveProbe {
    fn drop(&mut self) {
        // the source holds the listener, unregister it even if stop was never called
        self.listener.stop();
    }
}
