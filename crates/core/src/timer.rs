use chrono::{DateTime, Duration, Utc};

/// Countdown for the question currently on screen.
///
/// Remaining time is recomputed from the stored start timestamp on every
/// poll instead of decrementing a counter, so irregular polling cadences
/// cannot introduce drift. Expiry is level-triggered: once the limit has
/// elapsed, `remaining` stays pinned at zero until `restart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    started_at: DateTime<Utc>,
    limit: Duration,
}

impl QuestionTimer {
    /// Start a timer at `started_at` with the given per-question limit.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, limit: Duration) -> Self {
        Self { started_at, limit }
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time left before expiry, clamped at zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let left = self.limit - (now - self.started_at);
        left.max(Duration::zero())
    }

    /// Fraction of the limit still remaining, in `[0, 1]`.
    ///
    /// Suitable for driving a progress bar regardless of the configured
    /// limit. A zero or negative limit reports `0.0`.
    #[must_use]
    pub fn fraction_remaining(&self, now: DateTime<Utc>) -> f64 {
        let limit_ms = self.limit.num_milliseconds();
        if limit_ms <= 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.remaining(now).num_milliseconds() as f64 / limit_ms as f64;
        fraction.clamp(0.0, 1.0)
    }

    /// True once the limit has elapsed. Stays true until `restart`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now) == Duration::zero()
    }

    /// Reset the start timestamp, beginning a fresh countdown.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.started_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn timer() -> QuestionTimer {
        QuestionTimer::new(fixed_now(), Duration::seconds(20))
    }

    #[test]
    fn remaining_counts_down_from_limit() {
        let timer = timer();
        assert_eq!(timer.remaining(fixed_now()), Duration::seconds(20));
        assert_eq!(
            timer.remaining(fixed_now() + Duration::seconds(7)),
            Duration::seconds(13)
        );
    }

    #[test]
    fn remaining_clamps_at_zero_after_expiry() {
        let timer = timer();
        let late = fixed_now() + Duration::seconds(95);
        assert_eq!(timer.remaining(late), Duration::zero());
        assert!(timer.is_expired(late));
    }

    #[test]
    fn fraction_stays_within_unit_interval() {
        let timer = timer();
        assert!((timer.fraction_remaining(fixed_now()) - 1.0).abs() < f64::EPSILON);

        let halfway = fixed_now() + Duration::seconds(10);
        assert!((timer.fraction_remaining(halfway) - 0.5).abs() < 1e-9);

        let late = fixed_now() + Duration::seconds(60);
        assert!((timer.fraction_remaining(late)).abs() < f64::EPSILON);
    }

    #[test]
    fn expiry_is_level_triggered_until_restart() {
        let mut timer = timer();
        let late = fixed_now() + Duration::seconds(21);
        assert!(timer.is_expired(late));
        assert!(timer.is_expired(late + Duration::seconds(100)));

        timer.restart(late);
        assert!(!timer.is_expired(late));
        assert_eq!(timer.remaining(late), Duration::seconds(20));
    }

    #[test]
    fn exact_boundary_counts_as_expired() {
        let timer = timer();
        assert!(timer.is_expired(fixed_now() + Duration::seconds(20)));
    }
}
