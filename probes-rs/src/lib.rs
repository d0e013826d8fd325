//! # Crate probes-rs
//!
//! ## probes_rs
//!
//! Lifecycle and concurrency core of data collection probes.
//!
//! A probe moves through `Created -> Initialized -> Started -> Stopping -> Stopped`
//! (or `Initialized -> Failed` when the hardware is missing). Two kinds exist:
//!
//! - [`ActiveProbe`] owns a worker thread that polls a [`Poller`] at a fixed
//!   interval and sleeps on an interruptible trigger in between.
//! - [`PassiveProbe`] registers a listener with a push style
//!   [`common::HardwareSensorSource`] and converts every delivered event.
//!
//! Both hand each datum to a [`common::DatumStore`]. Acquisition and store
//! failures are logged and counted in [`StatsSnapshot`], they never stop a
//! probe. Once `stop` returns no further datum is stored.
//!
//! ### Example
//!
//! ```ignore
//! let probe = battery_probe(gauge, store, Arc::new(SystemClock));
//! probe.initialize(Some(Duration::from_secs(60)))?;
//! probe.start()?;
//! // ...
//! probe.stop()?;
//! ```

pub mod active;
pub mod config;
mod fault;
pub mod lifecycle;
pub mod listener;
pub mod passive;
pub mod probe;
pub mod probes;
pub mod quantizer;
pub mod registry;
pub mod stats;
pub mod trigger;

pub use active::{ActiveProbe, Poller, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
pub use config::ProbeConfig;
pub use lifecycle::Lifecycle;
pub use listener::{SensorListenerAdapter, DEFAULT_TIER};
pub use passive::{EventConverter, PassiveProbe};
pub use probe::{stop_async, AnyProbe, Probe};
pub use probes::{altitude_probe, battery_probe};
pub use quantizer::quantize;
pub use registry::ProbeRegistry;
pub use stats::{ProbeStats, StatsSnapshot};
