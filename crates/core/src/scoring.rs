use crate::model::{ProgressState, StageNumber, TrainerSettings};

/// Result of scoring a finished stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: StageNumber,
    pub correct: u32,
    pub total: u32,
    /// Floored percentage of correct answers.
    pub score_percent: u32,
    pub passed: bool,
    /// True when this pass moved the unlock frontier.
    pub unlocked_next: bool,
}

/// Pass/fail rule applied at the end of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pass_threshold_percent: u32,
}

impl ScoringPolicy {
    #[must_use]
    pub fn new(pass_threshold_percent: u32) -> Self {
        Self {
            pass_threshold_percent,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &TrainerSettings) -> Self {
        Self::new(settings.pass_threshold_percent())
    }

    #[must_use]
    pub fn pass_threshold_percent(&self) -> u32 {
        self.pass_threshold_percent
    }

    #[must_use]
    pub fn score_percent(correct: u32, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        let percent = u64::from(correct) * 100 / u64::from(total);
        u32::try_from(percent).unwrap_or(u32::MAX)
    }

    /// Compared in integers so that exactly the threshold passes.
    #[must_use]
    pub fn passes(&self, correct: u32, total: u32) -> bool {
        total > 0
            && u64::from(correct) * 100 >= u64::from(self.pass_threshold_percent) * u64::from(total)
    }

    /// Score a stage and apply frontier-only unlocking to `progress`.
    ///
    /// The caller is responsible for persisting `progress` when
    /// `unlocked_next` is true.
    pub fn complete_stage(
        &self,
        stage: StageNumber,
        correct: u32,
        total: u32,
        progress: &mut ProgressState,
    ) -> StageOutcome {
        let passed = self.passes(correct, total);
        let unlocked_next = progress.record_completion(stage, passed);
        StageOutcome {
            stage,
            correct,
            total,
            score_percent: Self::score_percent(correct, total),
            passed,
            unlocked_next,
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::from_settings(&TrainerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(n: u32) -> StageNumber {
        StageNumber::new(n).unwrap()
    }

    #[test]
    fn pass_boundary_is_inclusive() {
        let policy = ScoringPolicy::default();
        assert!(!policy.passes(94, 100));
        assert!(policy.passes(95, 100));
        assert!(policy.passes(100, 100));
        assert_eq!(ScoringPolicy::score_percent(94, 100), 94);
    }

    #[test]
    fn boundary_holds_for_other_stage_lengths() {
        let policy = ScoringPolicy::new(95);
        assert!(!policy.passes(18, 19));
        assert!(policy.passes(19, 20));
        assert!(!policy.passes(18, 20));
        assert!(!policy.passes(0, 0));
    }

    #[test]
    fn replaying_earlier_stage_keeps_frontier() {
        let policy = ScoringPolicy::default();
        let mut progress = ProgressState::new(stage(5));

        let outcome = policy.complete_stage(stage(3), 100, 100, &mut progress);
        assert!(outcome.passed);
        assert!(!outcome.unlocked_next);
        assert_eq!(progress.unlocked_stages(), 5);

        let outcome = policy.complete_stage(stage(5), 95, 100, &mut progress);
        assert!(outcome.unlocked_next);
        assert_eq!(progress.unlocked_stages(), 6);
    }

    #[test]
    fn failing_frontier_changes_nothing() {
        let policy = ScoringPolicy::default();
        let mut progress = ProgressState::new(stage(2));
        let outcome = policy.complete_stage(stage(2), 94, 100, &mut progress);
        assert!(!outcome.passed);
        assert_eq!(outcome.score_percent, 94);
        assert_eq!(progress.unlocked_stages(), 2);
    }
}
