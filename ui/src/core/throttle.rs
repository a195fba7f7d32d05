//! Leading- and trailing-edge throttle for pointer events.
//!
//! The throttle does no timing of its own. The caller offers events with the
//! current clock reading and, when told to, arms a timer that later calls
//! [`Throttle::fire`]. Whatever was offered last inside the window is what the
//! trailing run receives.

#[derive(Debug, Clone, PartialEq)]
pub enum ThrottleDecision<T> {
    /// Outside the window: handle this event now.
    RunNow(T),
    /// Inside the window and no timer armed yet: arm one for `delay_ms`.
    Schedule { delay_ms: u64 },
    /// A timer is already armed; the event replaced the pending one.
    Coalesced,
}

#[derive(Debug, Clone)]
pub struct Throttle<T> {
    wait_ms: f64,
    last_run: Option<f64>,
    pending: Option<T>,
    armed: bool,
}

impl<T> Throttle<T> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms: wait_ms as f64,
            last_run: None,
            pending: None,
            armed: false,
        }
    }

    pub fn offer(&mut self, now: f64, event: T) -> ThrottleDecision<T> {
        let elapsed = self.last_run.map(|last| now - last);
        match elapsed {
            Some(elapsed) if elapsed < self.wait_ms => {
                self.pending = Some(event);
                if self.armed {
                    ThrottleDecision::Coalesced
                } else {
                    self.armed = true;
                    let delay_ms = (self.wait_ms - elapsed).ceil().max(0.0) as u64;
                    ThrottleDecision::Schedule { delay_ms }
                }
            }
            _ => {
                self.last_run = Some(now);
                self.pending = None;
                ThrottleDecision::RunNow(event)
            }
        }
    }

    /// Called by the armed timer. Yields the latest pending event, if any.
    pub fn fire(&mut self, now: f64) -> Option<T> {
        self.armed = false;
        let event = self.pending.take()?;
        self.last_run = Some(now);
        Some(event)
    }

    /// Drop any pending event, e.g. when the pointer leaves the surface.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_runs_immediately() {
        let mut throttle = Throttle::new(30);
        assert_eq!(throttle.offer(0.0, 1), ThrottleDecision::RunNow(1));
    }

    #[test]
    fn events_inside_window_schedule_one_trailing_run() {
        let mut throttle = Throttle::new(30);
        throttle.offer(100.0, 1);
        assert_eq!(throttle.offer(110.0, 2), ThrottleDecision::Schedule { delay_ms: 20 });
        assert_eq!(throttle.offer(115.0, 3), ThrottleDecision::Coalesced);
        assert_eq!(throttle.fire(130.0), Some(3));
        assert_eq!(throttle.fire(131.0), None);
    }

    #[test]
    fn trailing_run_restarts_the_window() {
        let mut throttle = Throttle::new(30);
        throttle.offer(0.0, 'a');
        throttle.offer(10.0, 'b');
        assert_eq!(throttle.fire(30.0), Some('b'));
        assert_eq!(throttle.offer(40.0, 'c'), ThrottleDecision::Schedule { delay_ms: 20 });
        assert_eq!(throttle.offer(70.0, 'd'), ThrottleDecision::RunNow('d'));
    }

    #[test]
    fn cancelled_trailing_run_yields_nothing() {
        let mut throttle = Throttle::new(30);
        throttle.offer(0.0, 1);
        throttle.offer(5.0, 2);
        throttle.cancel();
        assert_eq!(throttle.fire(30.0), None);
    }
}
