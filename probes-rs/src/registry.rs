use dashmap::DashMap;
use log::{info, warn};
use rayon::prelude::*;
use std::sync::Arc;

use common::{ProbeError, ProbeState};

use crate::config::ProbeConfig;
use crate::probe::{AnyProbe, Probe};

/// Probes that failed a bulk operation, with the reason.
pub type Failures = Vec<(String, ProbeError)>;

/// Named collection of probes driven together.
///
/// Bulk operations visit every probe and collect the failures instead of
/// stopping at the first one.
#[derive(Default)]
pub struct ProbeRegistry {
    probes: DashMap<String, Arc<AnyProbe>>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `probe` under its own name, replacing and returning any probe of the same name.
    pub fn add(&self, probe: impl Into<AnyProbe>) -> Option<Arc<AnyProbe>> {
        let probe = probe.into();
        let name = probe.name().to_string();
        let replaced = self.probes.insert(name.clone(), Arc::new(probe));
        if replaced.is_some() {
            warn!("Probe \"{name}\" replaced in registry");
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<Arc<AnyProbe>> {
        self.probes.get(name).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, name: &str) -> Option<Arc<AnyProbe>> {
        self.probes.remove(name).map(|(_, probe)| probe)
    }

    /// Sorted probe names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.probes.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn states(&self) -> Vec<(String, ProbeState)> {
        let mut states: Vec<_> = self
            .snapshot()
            .into_iter()
            .map(|probe| (probe.name().to_string(), probe.state()))
            .collect();
        states.sort_by(|a, b| a.0.cmp(&b.0));
        states
    }

    // probes are called outside the map's shard locks
    fn snapshot(&self) -> Vec<Arc<AnyProbe>> {
        self.probes.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Initializes every enabled probe with the cadence of its config.
    ///
    /// Probes without a config are initialized with their default cadence;
    /// disabled ones are left untouched.
    pub fn initialize_all(&self, configs: &[ProbeConfig]) -> Failures {
        let mut failures = Vec::new();
        for probe in self.snapshot() {
            let config = configs.iter().find(|config| config.name == probe.name());
            if config.is_some_and(|config| !config.enabled) {
                info!("Probe \"{}\" disabled by configuration", probe.name());
                continue;
            }
            let cadence = config.and_then(ProbeConfig::cadence);
            if let Err(e) = probe.initialize(cadence) {
                warn!("Probe \"{}\" failed to initialize: {e}", probe.name());
                failures.push((probe.name().to_string(), e));
            }
        }
        failures
    }

    /// Starts every initialized probe.
    pub fn start_all(&self) -> Failures {
        let mut failures = Vec::new();
        for probe in self.snapshot() {
            if probe.state() != ProbeState::Initialized {
                continue;
            }
            if let Err(e) = probe.start() {
                warn!("Probe \"{}\" failed to start: {e}", probe.name());
                failures.push((probe.name().to_string(), e));
            }
        }
        failures
    }

    /// Stops all probes in parallel and returns once every one of them has stopped.
    pub fn stop_all(&self) -> Failures {
        self.snapshot()
            .par_iter()
            .filter_map(|probe| {
                probe.stop().err().map(|e| {
                    warn!("Probe \"{}\" failed to stop cleanly: {e}", probe.name());
                    (probe.name().to_string(), e)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active::{ActiveProbe, Poller};
    use common::{AcquisitionError, Clock, Datum, DatumPayload, SensorType};
    use std::time::Duration;
    use test_utils::sinks::StoreMock;
    use test_utils::sources::ClockMock;

    struct Fixed;

    impl Poller for Fixed {
        fn poll(&mut self, clock: &dyn Clock) -> Result<Datum, AcquisitionError> {
            Ok(Datum::new(clock.now(), DatumPayload::Battery { level: 0.5 }))
        }
    }

    struct Missing;

    impl Poller for Missing {
        fn initialize(&mut self, probe: &str) -> Result<(), ProbeError> {
            Err(ProbeError::UnsupportedHardware {
                probe: probe.to_string(),
                sensor_type: SensorType::Other("battery".to_string()),
            })
        }

        fn poll(&mut self, _clock: &dyn Clock) -> Result<Datum, AcquisitionError> {
            Err(AcquisitionError::NoReading("missing".to_string()))
        }
    }

    fn active(name: &str, poller: Box<dyn Poller>) -> ActiveProbe {
        ActiveProbe::new(
            name,
            poller,
            Arc::new(StoreMock::new()),
            Arc::new(ClockMock::default()),
        )
    }

    #[test]
    fn test_add_get_remove() {
        let registry = ProbeRegistry::new();
        assert!(registry.add(active("B", Box::new(Fixed))).is_none());
        assert!(registry.add(active("A", Box::new(Fixed))).is_none());
        assert!(registry.add(active("A", Box::new(Fixed))).is_some());

        assert_eq!(registry.names(), vec!["A", "B"]);
        assert!(registry.get("A").is_some());
        assert!(registry.remove("A").is_some());
        assert!(registry.get("A").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_bulk_operations_collect_failures() {
        let registry = ProbeRegistry::new();
        registry.add(active("Good", Box::new(Fixed)));
        registry.add(active("Missing", Box::new(Missing)));
        registry.add(active("Off", Box::new(Fixed)));

        let configs = [
            ProbeConfig::new("Good").with_cadence(Duration::from_millis(5)),
            ProbeConfig::new("Off").disabled(),
        ];
        let failures = registry.initialize_all(&configs);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "Missing");

        assert!(registry.start_all().is_empty());
        assert_eq!(
            registry.states(),
            vec![
                ("Good".to_string(), ProbeState::Started),
                ("Missing".to_string(), ProbeState::Failed),
                ("Off".to_string(), ProbeState::Created),
            ]
        );

        assert!(registry.stop_all().is_empty());
        assert_eq!(registry.get("Good").unwrap().state(), ProbeState::Stopped);
    }
}
