use std::sync::Mutex;

use common::{Clock, Timestamp};

/// Clock starting at a fixed instant and advancing by `step_secs` on every read.
pub struct ClockMock {
    next: Mutex<f64>,
    step_secs: f64,
}

impl ClockMock {
    pub fn new(start_secs: f64, step_secs: f64) -> Self {
        Self {
            next: Mutex::new(start_secs),
            step_secs,
        }
    }
}

impl Default for ClockMock {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl Clock for ClockMock {
    fn now(&self) -> Timestamp {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next += self.step_secs;
        Timestamp::from_secs(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_mock_advances() {
        let clock = ClockMock::new(10.0, 0.5);
        assert_eq!(clock.now().as_secs(), 10.0);
        assert_eq!(clock.now().as_secs(), 10.5);
        assert_eq!(clock.now().as_secs(), 11.0);
    }
}
