/// Platform battery API polled by the battery probe.
pub trait BatteryGauge: Send + Sync {
    /// Returns true if the device reports a battery at all.
    fn is_present(&self) -> bool;

    /// Remaining charge as a fraction in `[0, 1]`. Platforms without a reading
    /// (e.g. simulators) return a negative value or `None`.
    fn level(&self) -> Option<f64>;
}
