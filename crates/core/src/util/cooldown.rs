use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Gate for re-attempting an operation that just failed: after each recorded
/// failure the next attempt is allowed only once a growing interval has
/// passed (doubling, capped). A success resets the gate.
///
/// Used to keep a failing audio-backend open from being retried on every
/// render call in a tight loop.
#[derive(Debug)]
pub struct RetryCooldown {
    initial: Duration,
    max: Duration,
    state: Mutex<State>,
}

#[derive(Clone, Copy, Debug)]
struct State {
    interval: Duration,
    last_failure: Option<Instant>,
}

impl RetryCooldown {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            state: Mutex::new(State {
                interval: initial,
                last_failure: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Whether an attempt is allowed right now.
    pub fn ready(&self) -> bool {
        let state = self.lock();
        match state.last_failure {
            None => true,
            Some(at) => at.elapsed() >= state.interval,
        }
    }

    pub fn record_failure(&self) {
        let mut state = self.lock();
        if state.last_failure.is_some() {
            state.interval = (state.interval * 2).min(self.max);
        }
        state.last_failure = Some(Instant::now());
    }

    pub fn record_success(&self) {
        let mut state = self.lock();
        state.interval = self.initial;
        state.last_failure = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_until_first_failure() {
        let gate = RetryCooldown::new(Duration::from_secs(5), Duration::from_secs(60));
        assert!(gate.ready());
        gate.record_failure();
        assert!(!gate.ready());
    }

    #[test]
    fn interval_doubles_up_to_cap() {
        let gate = RetryCooldown::new(Duration::from_secs(5), Duration::from_secs(12));
        gate.record_failure();
        assert_eq!(gate.lock().interval, Duration::from_secs(5));
        gate.record_failure();
        assert_eq!(gate.lock().interval, Duration::from_secs(10));
        gate.record_failure();
        assert_eq!(gate.lock().interval, Duration::from_secs(12));
    }

    #[test]
    fn success_resets_the_gate() {
        let gate = RetryCooldown::new(Duration::from_secs(5), Duration::from_secs(60));
        gate.record_failure();
        gate.record_failure();
        gate.record_success();
        assert!(gate.ready());
        assert_eq!(gate.lock().interval, Duration::from_secs(5));
    }

    #[test]
    fn zero_interval_is_always_ready() {
        let gate = RetryCooldown::new(Duration::ZERO, Duration::ZERO);
        gate.record_failure();
        assert!(gate.ready());
    }
}
