use serde::{Deserialize, Serialize};

use crate::model::ids::StageNumber;

/// Persisted player progress: how many stages are unlocked.
///
/// `unlocked_stages` never decreases and is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(rename = "unlocked")]
    unlocked_stages: StageNumber,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            unlocked_stages: StageNumber::FIRST,
        }
    }
}

impl ProgressState {
    #[must_use]
    pub fn new(unlocked_stages: StageNumber) -> Self {
        Self { unlocked_stages }
    }

    #[must_use]
    pub fn unlocked_stages(&self) -> u32 {
        self.unlocked_stages.value()
    }

    #[must_use]
    pub fn is_unlocked(&self, stage: StageNumber) -> bool {
        stage <= self.unlocked_stages
    }

    /// Record a finished stage. Only a pass on the frontier stage unlocks the
    /// next one; replays of earlier stages never move the frontier.
    ///
    /// Returns true if `unlocked_stages` changed.
    pub fn record_completion(&mut self, stage: StageNumber, passed: bool) -> bool {
        if passed && stage == self.unlocked_stages {
            self.unlocked_stages = self.unlocked_stages.next();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(n: u32) -> StageNumber {
        StageNumber::new(n).unwrap()
    }

    #[test]
    fn default_unlocks_first_stage_only() {
        let progress = ProgressState::default();
        assert_eq!(progress.unlocked_stages(), 1);
        assert!(progress.is_unlocked(stage(1)));
        assert!(!progress.is_unlocked(stage(2)));
    }

    #[test]
    fn replay_does_not_move_frontier() {
        let mut progress = ProgressState::new(stage(5));
        assert!(!progress.record_completion(stage(3), true));
        assert_eq!(progress.unlocked_stages(), 5);

        assert!(!progress.record_completion(stage(5), false));
        assert_eq!(progress.unlocked_stages(), 5);

        assert!(progress.record_completion(stage(5), true));
        assert_eq!(progress.unlocked_stages(), 6);
    }
}
