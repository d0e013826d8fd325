use serde::{Deserialize, Serialize};

/// Lifecycle state of a probe.
///
/// The only forward path is `Created -> Initialized -> Started -> Stopping -> Stopped`.
/// `Failed` is entered from `Initialized` when the required hardware is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProbeState {
    #[default]
    Created,
    Initialized,
    Started,
    Stopping,
    Stopped,
    Failed,
}

impl ProbeState {
    /// Returns true once no further acquisition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProbeState::Stopped | ProbeState::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_created() {
        assert_eq!(ProbeState::default(), ProbeState::Created);
    }

    #[test]
    fn test_terminal_states() {
        assert!(ProbeState::Stopped.is_terminal());
        assert!(ProbeState::Failed.is_terminal());
        assert!(!ProbeState::Stopping.is_terminal());
        assert!(!ProbeState::Started.is_terminal());
    }
}
