use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted counters that decide when an interstitial is due.
///
/// Field names match the on-disk `ad_data.json` document; both default to 0
/// when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGateState {
    #[serde(rename = "last_24h_ad", default)]
    last_daily_ad: i64,
    #[serde(rename = "question_count", default)]
    questions_since_last_ad: u32,
}

impl AdGateState {
    #[must_use]
    pub fn new(last_daily_ad: i64, questions_since_last_ad: u32) -> Self {
        Self {
            last_daily_ad,
            questions_since_last_ad,
        }
    }

    /// Unix timestamp of the last daily ad, 0 if never watched.
    #[must_use]
    pub fn last_daily_ad(&self) -> i64 {
        self.last_daily_ad
    }

    #[must_use]
    pub fn questions_since_last_ad(&self) -> u32 {
        self.questions_since_last_ad
    }

    pub fn record_question(&mut self) {
        self.questions_since_last_ad = self.questions_since_last_ad.saturating_add(1);
    }

    /// True once `interval` questions were answered since the last interstitial.
    #[must_use]
    pub fn should_show_periodic_ad(&self, interval: u32) -> bool {
        self.questions_since_last_ad >= interval
    }

    pub fn record_ad_shown(&mut self) {
        self.questions_since_last_ad = 0;
    }

    /// True when at least `interval_secs` passed since the last daily ad.
    #[must_use]
    pub fn should_offer_daily_ad(&self, now: DateTime<Utc>, interval_secs: u32) -> bool {
        now.timestamp().saturating_sub(self.last_daily_ad) >= i64::from(interval_secs)
    }

    pub fn record_daily_ad_watched(&mut self, now: DateTime<Utc>) {
        self.last_daily_ad = now.timestamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn periodic_ad_after_interval() {
        let mut state = AdGateState::default();
        for _ in 0..2 {
            state.record_question();
        }
        assert!(!state.should_show_periodic_ad(3));
        state.record_question();
        assert!(state.should_show_periodic_ad(3));

        state.record_ad_shown();
        assert_eq!(state.questions_since_last_ad(), 0);
        assert!(!state.should_show_periodic_ad(3));
    }

    #[test]
    fn daily_ad_window() {
        let now = fixed_now();
        let mut state = AdGateState::default();
        assert!(state.should_offer_daily_ad(now, 86_400));

        state.record_daily_ad_watched(now);
        assert!(!state.should_offer_daily_ad(now + Duration::hours(23), 86_400));
        assert!(state.should_offer_daily_ad(now + Duration::hours(24), 86_400));
    }
}
