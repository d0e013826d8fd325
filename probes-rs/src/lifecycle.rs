use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

use common::{ProbeError, ProbeState};

/// Lifecycle state of one probe, guarded by a lock owned by that probe alone.
///
/// Only guards the state itself. Probes serialize their `initialize`, `start`
/// and `stop` on a separate lock so that the work each transition triggers
/// (binding, spawning, registering) cannot interleave with another transition.
pub struct Lifecycle {
    name: String,
    state: Mutex<ProbeState>,
}

fn is_forward_edge(from: ProbeState, to: ProbeState) -> bool {
    matches!(
        (from, to),
        (ProbeState::Created, ProbeState::Initialized)
            | (ProbeState::Initialized, ProbeState::Started)
            | (ProbeState::Initialized, ProbeState::Failed)
            | (ProbeState::Started, ProbeState::Stopping)
            | (ProbeState::Stopping, ProbeState::Stopped)
    )
}

impl Lifecycle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(ProbeState::Created),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProbeState {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves the probe from `expected` to `target`.
    ///
    /// This is the only way the state is ever written. Fails with
    /// `InvalidStateTransition` if the current state is not `expected` or if
    /// `expected -> target` is not an edge of the lifecycle.
    pub fn change_state(&self, expected: ProbeState, target: ProbeState) -> Result<(), ProbeError> {
        let mut state = self.lock();
        if *state != expected || !is_forward_edge(expected, target) {
            return Err(ProbeError::InvalidStateTransition {
                probe: self.name.clone(),
                expected,
                actual: *state,
                target,
            });
        }

        debug!("Probe \"{}\": {:?} -> {:?}", self.name, expected, target);
        *state = target;
        Ok(())
    }

    /// Moves a started probe to `Stopping`. Returns false if it was not running.
    pub(crate) fn begin_stop(&self) -> bool {
        self.change_state(ProbeState::Started, ProbeState::Stopping)
            .is_ok()
    }
}
