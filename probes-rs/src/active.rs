use log::{debug, error, info, trace, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use common::{AcquisitionError, Clock, Datum, DatumStore, ProbeError, ProbeState};

use crate::fault;
use crate::lifecycle::Lifecycle;
use crate::stats::{ProbeStats, StatsSnapshot};
use crate::trigger::{Trigger, Wake};

/// Poll interval used when a probe is initialized without a cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
/// Shortest accepted poll interval. Shorter cadences are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Acquisition step of an active probe.
pub trait Poller: Send {
    /// Binds the resources the poller needs. Called once, from `initialize`.
    fn initialize(&mut self, _probe: &str) -> Result<(), ProbeError> {
        Ok(())
    }

    /// Takes one reading.
    fn poll(&mut self, clock: &dyn Clock) -> Result<Datum, AcquisitionError>;
}

struct Shared {
    lifecycle: Lifecycle,
    trigger: Trigger,
    poller: Mutex<Box<dyn Poller>>,
    store: Arc<dyn DatumStore>,
    clock: Arc<dyn Clock>,
    stats: ProbeStats,
}

impl Shared {
    fn poller(&self) -> MutexGuard<'_, Box<dyn Poller>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run_cycle(&self) {
        let name = self.lifecycle.name();
        self.stats.cycle();

        let datum = fault::acquire(name, &self.stats, || {
            self.poller().poll(self.clock.as_ref())
        });
        if let Some(datum) = datum {
            fault::store_datum(name, self.store.as_ref(), &self.stats, datum);
        }
    }

    fn run(&self, interval: Duration) {
        let name = self.lifecycle.name();
        info!("Probe \"{name}\" polling every {interval:?}");

        while self.lifecycle.state() == ProbeState::Started {
            let wake = self.trigger.wait_timeout(interval);

            // stop sets the trigger after leaving Started, re-check before polling
            if self.lifecycle.state() != ProbeState::Started {
                break;
            }
            if wake == Wake::Signaled {
                trace!("Probe \"{name}\" polling on signal");
            }
            self.run_cycle();
        }

        if let Err(e) = self
            .lifecycle
            .change_state(ProbeState::Stopping, ProbeState::Stopped)
        {
            error!("Probe \"{name}\" worker could not complete shutdown: {e}");
        }
        debug!("Probe \"{name}\" worker exited");
    }
}

/// Probe that polls its data source on a dedicated worker thread.
///
/// The worker sleeps on an interruptible trigger between polls, so `stop`
/// returns after at most the acquisition cycle that is in flight instead of
/// the remaining poll interval.
pub struct ActiveProbe {
    shared: Arc<Shared>,
    interval: Mutex<Duration>,
    poll_immediately: bool,
    /// Worker handle. Its lock also serializes `initialize`, `start` and `stop`.
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ActiveProbe {
    pub fn new(
        name: &str,
        poller: Box<dyn Poller>,
        store: Arc<dyn DatumStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                lifecycle: Lifecycle::new(name),
                trigger: Trigger::new(false),
                poller: Mutex::new(poller),
                store,
                clock,
                stats: ProbeStats::default(),
            }),
            interval: Mutex::new(DEFAULT_POLL_INTERVAL),
            poll_immediately: true,
            worker: Mutex::new(None),
        }
    }

    /// Whether the first poll happens right after `start` (default) or one interval later.
    pub fn poll_immediately(mut self, poll_immediately: bool) -> Self {
        self.poll_immediately = poll_immediately;
        self
    }

    pub fn name(&self) -> &str {
        self.shared.lifecycle.name()
    }

    pub fn state(&self) -> ProbeState {
        self.shared.lifecycle.state()
    }

    pub fn interval(&self) -> Duration {
        *self.interval.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    fn worker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the poll interval and binds the poller's resources.
    ///
    /// Fails with `UnsupportedHardware` (leaving the probe `Failed`) if the
    /// poller cannot find its data source. A concurrent `start` waits until
    /// the binding is done.
    pub fn initialize(&self, cadence: Option<Duration>) -> Result<(), ProbeError> {
        let _transition = self.worker();
        let lifecycle = &self.shared.lifecycle;
        lifecycle.change_state(ProbeState::Created, ProbeState::Initialized)?;

        let mut interval = cadence.unwrap_or(DEFAULT_POLL_INTERVAL);
        if interval < MIN_POLL_INTERVAL {
            warn!(
                "Probe \"{}\": poll interval {interval:?} raised to {MIN_POLL_INTERVAL:?}",
                lifecycle.name()
            );
            interval = MIN_POLL_INTERVAL;
        }
        *self.interval.lock().unwrap_or_else(PoisonError::into_inner) = interval;

        let bound = self.shared.poller().initialize(lifecycle.name());
        if let Err(e) = bound {
            lifecycle.change_state(ProbeState::Initialized, ProbeState::Failed)?;
            return Err(e);
        }
        Ok(())
    }

    /// Moves the probe to `Started` and spawns its worker thread.
    pub fn start(&self) -> Result<(), ProbeError> {
        // held until the handle is stored so a concurrent stop always finds it
        let mut worker = self.worker();
        let lifecycle = &self.shared.lifecycle;
        lifecycle.change_state(ProbeState::Initialized, ProbeState::Started)?;

        if self.poll_immediately {
            self.shared.trigger.set();
        }

        let shared = self.shared.clone();
        let interval = self.interval();
        let spawned = thread::Builder::new()
            .name(format!("probe-{}", lifecycle.name()))
            .spawn(move || shared.run(interval));

        match spawned {
            Ok(handle) => {
                self.shared.stats.worker_spawned();
                *worker = Some(handle);
                info!("Probe \"{}\" started", lifecycle.name());
                Ok(())
            }
            Err(e) => {
                lifecycle.change_state(ProbeState::Started, ProbeState::Stopping)?;
                lifecycle.change_state(ProbeState::Stopping, ProbeState::Stopped)?;
                Err(ProbeError::Worker {
                    probe: lifecycle.name().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Stops polling and blocks until the worker has exited.
    ///
    /// Once this returns the probe is `Stopped` and no further datum will be
    /// stored. Calling it on a probe that is not running is a no-op; calling it
    /// while another thread is stopping the probe waits for that stop.
    /// Must not be called from the probe's own poller or store.
    pub fn stop(&self) -> Result<(), ProbeError> {
        let mut worker = self.worker();
        let lifecycle = &self.shared.lifecycle;
        if !lifecycle.begin_stop() {
            debug!("Probe \"{}\" not running, nothing to stop", lifecycle.name());
            return Ok(());
        }

        // wake the worker now instead of letting it sleep out the interval
        self.shared.trigger.set();

        let joined = match worker.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        };

        if joined.is_err() || lifecycle.state() == ProbeState::Stopping {
            // the worker died before writing its final state
            lifecycle.change_state(ProbeState::Stopping, ProbeState::Stopped)?;
            return Err(ProbeError::Worker {
                probe: lifecycle.name().to_string(),
                reason: "worker terminated abnormally".to_string(),
            });
        }

        info!("Probe \"{}\" stopped", lifecycle.name());
        Ok(())
    }
}

impl Drop for ActiveProbe {
    fn drop(&mut self) {
        if self.state() == ProbeState::Started {
            if let Err(e) = self.stop() {
                error!("Error stopping probe \"{}\" on drop: {e}", self.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{DatumPayload, Timestamp};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;
    use test_utils::sinks::StoreMock;
    use test_utils::sources::ClockMock;

    struct CountingPoller {
        polls: Arc<AtomicUsize>,
    }

    impl Poller for CountingPoller {
        fn poll(&mut self, clock: &dyn Clock) -> Result<Datum, AcquisitionError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            Ok(Datum::new(clock.now(), DatumPayload::Battery { level: 1.0 }))
        }
    }

    struct MissingHardware;

    impl Poller for MissingHardware {
        fn initialize(&mut self, probe: &str) -> Result<(), ProbeError> {
            Err(ProbeError::UnsupportedHardware {
                probe: probe.to_string(),
                sensor_type: common::SensorType::Other("battery".to_string()),
            })
        }

        fn poll(&mut self, _clock: &dyn Clock) -> Result<Datum, AcquisitionError> {
            unreachable!("never initialized");
        }
    }

    fn counting_probe(store: &StoreMock) -> (ActiveProbe, Arc<AtomicUsize>) {
        let polls = Arc::new(AtomicUsize::new(0));
        let probe = ActiveProbe::new(
            "Counting",
            Box::new(CountingPoller {
                polls: polls.clone(),
            }),
            Arc::new(store.clone()),
            Arc::new(ClockMock::default()),
        );
        (probe, polls)
    }

    #[test]
    fn test_initialize_sets_interval() {
        let (probe, _) = counting_probe(&StoreMock::new());
        probe.initialize(Some(Duration::from_millis(250))).unwrap();
        assert_eq!(probe.interval(), Duration::from_millis(250));
        assert_eq!(probe.state(), ProbeState::Initialized);
    }

    #[test]
    fn test_initialize_without_cadence_uses_default() {
        let (probe, _) = counting_probe(&StoreMock::new());
        probe.initialize(None).unwrap();
        assert_eq!(probe.interval(), DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_initialize_raises_zero_interval() {
        let (probe, _) = counting_probe(&StoreMock::new());
        probe.initialize(Some(Duration::ZERO)).unwrap();
        assert_eq!(probe.interval(), MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_initialize_missing_hardware_fails_probe() {
        let probe = ActiveProbe::new(
            "Missing",
            Box::new(MissingHardware),
            Arc::new(StoreMock::new()),
            Arc::new(ClockMock::default()),
        );
        let error = probe.initialize(None).unwrap_err();
        assert!(matches!(error, ProbeError::UnsupportedHardware { .. }));
        assert_eq!(probe.state(), ProbeState::Failed);
        assert!(probe.start().is_err());
    }

    #[test]
    fn test_start_before_initialize_fails() {
        let (probe, _) = counting_probe(&StoreMock::new());
        assert!(matches!(
            probe.start(),
            Err(ProbeError::InvalidStateTransition { .. })
        ));
        assert_eq!(probe.stats().workers_spawned, 0);
    }

    #[test]
    fn test_first_poll_is_immediate() {
        let store = StoreMock::new();
        let (probe, polls) = counting_probe(&store);
        probe.initialize(Some(Duration::from_secs(60))).unwrap();
        probe.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while polls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        probe.stop().unwrap();

        assert_eq!(polls.load(Ordering::SeqCst), 1);
        assert_eq!(store.calls(), 1);
        assert_eq!(store.data()[0].timestamp(), Timestamp::from_secs(0.0));
    }

    #[test]
    fn test_delayed_first_poll() {
        let store = StoreMock::new();
        let (probe, polls) = counting_probe(&store);
        let probe = probe.poll_immediately(false);
        probe.initialize(Some(Duration::from_secs(60))).unwrap();
        probe.start().unwrap();
        thread::sleep(Duration::from_millis(30));
        probe.stop().unwrap();

        assert_eq!(polls.load(Ordering::SeqCst), 0);
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_stop_interrupts_long_interval() {
        let (probe, _) = counting_probe(&StoreMock::new());
        probe.initialize(Some(Duration::from_secs(60))).unwrap();
        probe.start().unwrap();
        thread::sleep(Duration::from_millis(20));

        let start = Instant::now();
        probe.stop().unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(probe.state(), ProbeState::Stopped);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let (probe, _) = counting_probe(&StoreMock::new());
        probe.stop().unwrap();
        assert_eq!(probe.state(), ProbeState::Created);

        probe.initialize(None).unwrap();
        probe.stop().unwrap();
        assert_eq!(probe.state(), ProbeState::Initialized);
    }

    #[test]
    fn test_drop_stops_worker() {
        let store = StoreMock::new();
        let (probe, _) = counting_probe(&store);
        probe.initialize(Some(Duration::from_millis(5))).unwrap();
        probe.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        drop(probe);

        let calls = store.calls();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(store.calls(), calls);
    }
}
