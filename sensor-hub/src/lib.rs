//! # Crate sensor-hub
//!
//! ## sensor-hub
//!
//! The `sensor-hub` crate provides an in-process [`HardwareSensorSource`](common::HardwareSensorSource).
//! Sensors are declared up front, listeners register against one of them with a delivery tier,
//! and every published event is fanned out to the matching listeners on the rayon thread pool,
//! so listeners always run on threads they do not own.
//!
//! ### Example
//!
//! ```ignore
//! let hub = Arc::new(SensorHub::new(&[Sensor::new(SensorType::Pressure, "bmp280")]));
//! let sensor = hub.default_sensor(&SensorType::Pressure).unwrap();
//!
//! let id = hub.register_listener(listener, &sensor, SensorTier::Ui);
//! hub.publish(SensorEvent::new(SensorType::Pressure, vec![1013.25], Accuracy::High));
//! hub.unregister_listener(id);
//! ```

pub mod feed;
pub mod hub;

pub use feed::run_feed;
pub use hub::SensorHub;
