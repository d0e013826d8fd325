use std::sync::Mutex;

use common::BatteryGauge;

/// Battery gauge returning a scripted level.
pub struct GaugeMock {
    present: bool,
    level: Mutex<Option<f64>>,
}

impl GaugeMock {
    pub fn new(level: f64) -> Self {
        Self {
            present: true,
            level: Mutex::new(Some(level)),
        }
    }

    /// A device without a battery.
    pub fn absent() -> Self {
        Self {
            present: false,
            level: Mutex::new(None),
        }
    }

    pub fn set_level(&self, level: Option<f64>) {
        *self.level.lock().unwrap() = level;
    }
}

impl BatteryGauge for GaugeMock {
    fn is_present(&self) -> bool {
        self.present
    }

    fn level(&self) -> Option<f64> {
        *self.level.lock().unwrap()
    }
}
