//! Wall-clock access for the daily-ad timer.

use chrono::{DateTime, Duration, Utc};

/// Where "now" comes from. Tests pin it to a fixed instant.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// The same clock moved forward by `delta`. A system clock is unchanged.
    #[must_use]
    pub fn shifted(self, delta: Duration) -> Self {
        match self {
            Clock::System => Clock::System,
            Clock::Fixed(t) => Clock::Fixed(t + delta),
        }
    }
}

/// 2023-11-14T22:13:20Z.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::Fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifting_moves_only_fixed_clocks() {
        let later = fixed_clock().shifted(Duration::days(1));
        assert_eq!(later.now().timestamp(), FIXED_TEST_TIMESTAMP + 86_400);
        assert!(matches!(Clock::System.shifted(Duration::hours(1)), Clock::System));
    }
}
