use std::thread;
use std::time::{Duration, Instant};

/// Holds the animation loop between frames.
pub trait Pacer {
    fn tick(&mut self);
}

/// Sleeps until the next deadline, one `period` after the previous one.
///
/// A late loop gets a fresh deadline instead of a burst of catch-up frames.
pub struct FixedRate {
    period: Duration,
    next: Option<Instant>,
}

impl FixedRate {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns the time to wait from `now` and moves the deadline forward.
    fn advance(&mut self, now: Instant) -> Duration {
        let deadline = *self.next.get_or_insert(now + self.period);

        if deadline > now {
            self.next = Some(deadline + self.period);
            deadline - now
        } else {
            self.next = Some(now + self.period);
            Duration::ZERO
        }
    }
}

impl Pacer for FixedRate {
    fn tick(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(30);

    #[test]
    fn first_tick_waits_a_full_period() {
        let mut pacer = FixedRate::new(PERIOD);
        assert_eq!(pacer.advance(Instant::now()), PERIOD);
    }

    #[test]
    fn deadlines_stay_on_the_grid() {
        let start = Instant::now();
        let mut pacer = FixedRate::new(PERIOD);
        pacer.advance(start);

        // drawing took 10ms, so only 20ms are left
        let wait = pacer.advance(start + PERIOD + Duration::from_millis(10));
        assert_eq!(wait, Duration::from_millis(20));
        assert_eq!(pacer.next, Some(start + PERIOD * 3));
    }

    #[test]
    fn late_frames_reset_the_deadline() {
        let start = Instant::now();
        let mut pacer = FixedRate::new(PERIOD);
        pacer.advance(start);

        let late = start + Duration::from_millis(100);
        assert_eq!(pacer.advance(late), Duration::ZERO);
        assert_eq!(pacer.next, Some(late + PERIOD));
    }

    #[test]
    fn tick_sleeps() {
        let mut pacer = FixedRate::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.tick();
        assert!(start.elapsed() >= pacer.period());
    }
}
