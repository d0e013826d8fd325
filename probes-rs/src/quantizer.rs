use std::time::Duration;

use common::SensorTier;

/// Maps a desired sampling period onto the delivery tier of a hardware source.
///
/// Picks the coarsest tier whose threshold does not exceed `period`, so the
/// delivered rate is never slower than requested while avoiding needless
/// over-sampling. Thresholds are inclusive: exactly 60 ms selects
/// [`SensorTier::Ui`]. Periods below every threshold map to [`SensorTier::Fastest`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use common::SensorTier;
/// use probes_rs::quantize;
///
/// assert_eq!(quantize(Duration::from_millis(5)), SensorTier::Fastest);
/// assert_eq!(quantize(Duration::from_millis(250)), SensorTier::Normal);
/// ```
pub fn quantize(period: Duration) -> SensorTier {
    SensorTier::ALL
        .iter()
        .rev()
        .find(|tier| tier.threshold() <= period)
        .copied()
        .unwrap_or(SensorTier::Fastest)
}
