use std::sync::Arc;
use std::time::Duration;

use common::{ProbeError, ProbeState};

use crate::active::ActiveProbe;
use crate::passive::PassiveProbe;
use crate::stats::StatsSnapshot;

/// Lifecycle surface shared by all probes.
///
/// Every method may be called from any thread. `stop` blocks until the probe
/// is `Stopped`; use [`stop_async`] from async code.
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;

    /// `Created -> Initialized`, or `Failed` if the hardware is missing.
    fn initialize(&self, cadence: Option<Duration>) -> Result<(), ProbeError>;

    /// `Initialized -> Started`.
    fn start(&self) -> Result<(), ProbeError>;

    /// `Started -> Stopping -> Stopped`. A no-op on a probe that is not running.
    fn stop(&self) -> Result<(), ProbeError>;

    fn state(&self) -> ProbeState;

    fn stats(&self) -> StatsSnapshot;
}

impl Probe for ActiveProbe {
    fn name(&self) -> &str {
        ActiveProbe::name(self)
    }

    fn initialize(&self, cadence: Option<Duration>) -> Result<(), ProbeError> {
        ActiveProbe::initialize(self, cadence)
    }

    fn start(&self) -> Result<(), ProbeError> {
        ActiveProbe::start(self)
    }

    fn stop(&self) -> Result<(), ProbeError> {
        ActiveProbe::stop(self)
    }

    fn state(&self) -> ProbeState {
        ActiveProbe::state(self)
    }

    fn stats(&self) -> StatsSnapshot {
        ActiveProbe::stats(self)
    }
}

impl Probe for PassiveProbe {
    fn name(&self) -> &str {
        PassiveProbe::name(self)
    }

    fn initialize(&self, cadence: Option<Duration>) -> Result<(), ProbeError> {
        PassiveProbe::initialize(self, cadence)
    }

    fn start(&self) -> Result<(), ProbeError> {
        PassiveProbe::start(self)
    }

    fn stop(&self) -> Result<(), ProbeError> {
        PassiveProbe::stop(self)
    }

    fn state(&self) -> ProbeState {
        PassiveProbe::state(self)
    }

    fn stats(&self) -> StatsSnapshot {
        PassiveProbe::stats(self)
    }
}

/// Either kind of probe, for holding heterogeneous probes in one collection.
pub enum AnyProbe {
    Active(ActiveProbe),
    Passive(PassiveProbe),
}

impl AnyProbe {
    fn inner(&self) -> &dyn Probe {
        match self {
            AnyProbe::Active(probe) => probe,
            AnyProbe::Passive(probe) => probe,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AnyProbe::Active(_))
    }
}

impl Probe for AnyProbe {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn initialize(&self, cadence: Option<Duration>) -> Result<(), ProbeError> {
        self.inner().initialize(cadence)
    }

    fn start(&self) -> Result<(), ProbeError> {
        self.inner().start()
    }

    fn stop(&self) -> Result<(), ProbeError> {
        self.inner().stop()
    }

    fn state(&self) -> ProbeState {
        self.inner().state()
    }

    fn stats(&self) -> StatsSnapshot {
        self.inner().stats()
    }
}

impl From<ActiveProbe> for AnyProbe {
    fn from(probe: ActiveProbe) -> Self {
        AnyProbe::Active(probe)
    }
}

impl From<PassiveProbe> for AnyProbe {
    fn from(probe: PassiveProbe) -> Self {
        AnyProbe::Passive(probe)
    }
}

/// Stops `probe` on the blocking pool so an async caller never parks its executor.
pub async fn stop_async<P>(probe: Arc<P>) -> Result<(), ProbeError>
where
    P: Probe + ?Sized + 'static,
{
    let name = probe.name().to_string();
    tokio::task::spawn_blocking(move || probe.stop())
        .await
        .unwrap_or_else(|e| {
            Err(ProbeError::Worker {
                probe: name,
                reason: e.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active::Poller;
    use common::{AcquisitionError, Clock, Datum, DatumPayload};
    use test_utils::sinks::StoreMock;
    use test_utils::sources::ClockMock;

    struct FullBattery;

    impl Poller for FullBattery {
        fn poll(&mut self, clock: &dyn Clock) -> Result<Datum, AcquisitionError> {
            Ok(Datum::new(clock.now(), DatumPayload::Battery { level: 1.0 }))
        }
    }

    fn any_active() -> AnyProbe {
        ActiveProbe::new(
            "Battery",
            Box::new(FullBattery),
            Arc::new(StoreMock::new()),
            Arc::new(ClockMock::default()),
        )
        .into()
    }

    #[test]
    fn test_any_probe_delegates() {
        let probe = any_active();
        assert!(probe.is_active());
        assert_eq!(probe.name(), "Battery");

        probe.initialize(Some(Duration::from_millis(10))).unwrap();
        probe.start().unwrap();
        assert_eq!(probe.state(), ProbeState::Started);
        probe.stop().unwrap();
        assert_eq!(probe.state(), ProbeState::Stopped);
        assert_eq!(probe.stats().workers_spawned, 1);
    }

    #[tokio::test]
    async fn test_stop_async() {
        let probe: Arc<dyn Probe> = Arc::new(any_active());
        probe.initialize(Some(Duration::from_millis(10))).unwrap();
        probe.start().unwrap();

        stop_async(probe.clone()).await.unwrap();
        assert_eq!(probe.state(), ProbeState::Stopped);
    }
}
