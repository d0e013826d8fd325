use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discrete delivery rate classes exposed by a hardware sensor source,
/// ordered from the fastest to the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorTier {
    Fastest,
    Game,
    Ui,
    Normal,
}

impl SensorTier {
    /// All tiers, fastest first.
    pub const ALL: [SensorTier; 4] = [
        SensorTier::Fastest,
        SensorTier::Game,
        SensorTier::Ui,
        SensorTier::Normal,
    ];

    /// Smallest requested sampling period this tier is selected for.
    pub fn threshold(&self) -> Duration {
        match self {
            SensorTier::Fastest => Duration::ZERO,
            SensorTier::Game => Duration::from_millis(20),
            SensorTier::Ui => Duration::from_millis(60),
            SensorTier::Normal => Duration::from_millis(200),
        }
    }
}
