use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Reason a wait on a [`Trigger`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Signaled,
    TimedOut,
}

/// Binary auto-reset signal with an interruptible timed wait.
///
/// `set` wakes one waiter, or the next one if nobody waits yet. The signal is
/// consumed by the wait it wakes.
#[derive(Debug, Default)]
pub struct Trigger {
    signaled: Mutex<bool>,
    cvar: Condvar,
}

impl Trigger {
    pub fn new(signaled: bool) -> Self {
        Self {
            signaled: Mutex::new(signaled),
            cvar: Condvar::new(),
        }
    }

    pub fn set(&self) {
        let mut signaled = self.signaled.lock().unwrap_or_else(PoisonError::into_inner);
        *signaled = true;
        self.cvar.notify_one();
    }

    /// Waits until the trigger is set or `timeout` elapses, whichever comes first.
    pub fn wait_timeout(&self, timeout: Duration) -> Wake {
        let signaled = self.signaled.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut signaled, _) = self
            .cvar
            .wait_timeout_while(signaled, timeout, |signaled| !*signaled)
            .unwrap_or_else(PoisonError::into_inner);

        if *signaled {
            *signaled = false;
            Wake::Signaled
        } else {
            Wake::TimedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_wait_times_out() {
        let trigger = Trigger::new(false);
        let start = Instant::now();
        assert_eq!(trigger.wait_timeout(Duration::from_millis(30)), Wake::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_initially_set_returns_immediately_once() {
        let trigger = Trigger::new(true);
        assert_eq!(trigger.wait_timeout(Duration::from_secs(5)), Wake::Signaled);
        assert_eq!(trigger.wait_timeout(Duration::from_millis(10)), Wake::TimedOut);
    }

    #[test]
    fn test_set_interrupts_long_wait() {
        let trigger = Arc::new(Trigger::new(false));
        let waiter = {
            let trigger = trigger.clone();
            thread::spawn(move || {
                let start = Instant::now();
                (trigger.wait_timeout(Duration::from_secs(10)), start.elapsed())
            })
        };

        thread::sleep(Duration::from_millis(20));
        trigger.set();

        let (wake, elapsed) = waiter.join().unwrap();
        assert_eq!(wake, Wake::Signaled);
        assert!(elapsed < Duration::from_secs(5));
    }
}
