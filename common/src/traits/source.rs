use std::sync::Arc;
use uuid::Uuid;

use crate::types::{Accuracy, Sensor, SensorEvent, SensorTier, SensorType};

/// Identifier handed out by a source when a listener is registered.
pub type ListenerId = Uuid;

/// Receiver of pushed sensor events.
///
/// Both callbacks run on a thread owned by the source. Implementations must not
/// block for long and must not call back into the source.
pub trait SensorListener: Send + Sync {
    fn on_sensor_changed(&self, event: &SensorEvent);
    fn on_accuracy_changed(&self, sensor: &Sensor, accuracy: Accuracy);
}

/// Push style provider of hardware sensor events.
pub trait HardwareSensorSource: Send + Sync {
    /// Returns the default sensor of the given type, if the device has one.
    fn default_sensor(&self, sensor_type: &SensorType) -> Option<Sensor>;

    /// Starts delivering events of `sensor` to `listener` at the given tier.
    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor: &Sensor,
        tier: SensorTier,
    ) -> ListenerId;

    /// Stops all deliveries to the listener. Unknown ids are ignored.
    fn unregister_listener(&self, id: ListenerId);
}
