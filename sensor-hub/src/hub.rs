use dashmap::DashMap;
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use common::{
    Accuracy, HardwareSensorSource, ListenerId, Sensor, SensorEvent, SensorListener, SensorTier,
    SensorType,
};

#[derive(Clone)]
struct Registration {
    sensor: Sensor,
    tier: SensorTier,
    listener: Arc<dyn SensorListener>,
}

/// Record of available sensors and of the listeners that will be notified of their events.
#[derive(Clone, Default)]
pub struct SensorHub {
    sensors: Arc<DashMap<SensorType, Sensor>>,
    registrations: Arc<DashMap<ListenerId, Registration>>,
}

impl SensorHub {
    /// Creates a hub exposing the given sensors. Later sensors replace earlier ones of the same type.
    pub fn new(sensors: &[Sensor]) -> Self {
        let collection = DashMap::<SensorType, Sensor>::new();
        for sensor in sensors {
            collection.insert(sensor.sensor_type().clone(), sensor.clone());
        }

        Self {
            sensors: Arc::new(collection),
            registrations: Arc::new(DashMap::new()),
        }
    }

    pub fn add_sensor(&self, sensor: Sensor) {
        self.sensors.insert(sensor.sensor_type().clone(), sensor);
    }

    /// Removes a sensor and drops every registration attached to it.
    pub fn remove_sensor(&self, sensor_type: &SensorType) {
        if let Some((_, sensor)) = self.sensors.remove(sensor_type) {
            self.registrations
                .retain(|_, registration| registration.sensor.id() != sensor.id());
        }
    }

    pub fn available_sensor_types(&self) -> Vec<SensorType> {
        self.sensors
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Returns the tier a listener was registered with.
    pub fn registered_tier(&self, id: ListenerId) -> Option<SensorTier> {
        self.registrations.get(&id).map(|entry| entry.tier)
    }

    // Returns number of registered listeners
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    // Returns true if no listeners registered
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn listeners_of(&self, sensor_type: &SensorType) -> Vec<(Sensor, Arc<dyn SensorListener>)> {
        self.registrations
            .iter()
            .filter(|entry| entry.sensor.sensor_type() == sensor_type)
            .map(|entry| (entry.sensor.clone(), entry.listener.clone()))
            .collect()
    }

    /// Delivers an event to every listener registered for its sensor type.
    ///
    /// Listeners run in parallel on the rayon pool; the call returns once all of them returned.
    /// Returns the number of listeners the event was delivered to.
    pub fn publish(&self, event: SensorEvent) -> usize {
        let listeners = self.listeners_of(event.sensor_type());
        if listeners.is_empty() {
            debug!("No listener for {} event", event.sensor_type());
            return 0;
        }

        let delivered = listeners.len();
        let event = Arc::new(event);
        listeners.into_par_iter().for_each(|(_, listener)| {
            let event = event.clone();
            listener.on_sensor_changed(&event);
        });
        delivered
    }

    /// Reports an accuracy change of a sensor to its listeners.
    pub fn publish_accuracy(&self, sensor_type: &SensorType, accuracy: Accuracy) -> usize {
        let listeners = self.listeners_of(sensor_type);
        let delivered = listeners.len();
        listeners.into_par_iter().for_each(|(sensor, listener)| {
            listener.on_accuracy_changed(&sensor, accuracy);
        });
        delivered
    }
}

impl HardwareSensorSource for SensorHub {
    fn default_sensor(&self, sensor_type: &SensorType) -> Option<Sensor> {
        self.sensors.get(sensor_type).map(|entry| entry.clone())
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor: &Sensor,
        tier: SensorTier,
    ) -> ListenerId {
        let listener_id = Uuid::new_v4();
        if !self.sensors.contains_key(sensor.sensor_type()) {
            warn!(
                "Listener {listener_id} registered for {} which this hub does not expose",
                sensor.sensor_type()
            );
        }
        debug!(
            "Registering listener {listener_id} on {} at {:?}",
            sensor.sensor_type(),
            tier
        );
        self.registrations.insert(
            listener_id,
            Registration {
                sensor: sensor.clone(),
                tier,
                listener,
            },
        );
        listener_id
    }

    fn unregister_listener(&self, id: ListenerId) {
        if self.registrations.remove(&id).is_some() {
            debug!("Unregistered listener {id}");
        }
    }
}
