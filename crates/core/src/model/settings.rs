use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("questions per stage must be > 0")]
    InvalidQuestionsPerStage,

    #[error("pass threshold must be between 1 and 100 percent")]
    InvalidPassThreshold,

    #[error("stage count must be > 0")]
    InvalidStageCount,

    #[error("ad interval must be > 0 questions")]
    InvalidAdInterval,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for stages, scoring and the ad gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerSettings {
    questions_per_stage: u32,
    pass_threshold_percent: u32,
    stage_count: u32,
    answer_delay_ms: u64,
    ad_interval_questions: u32,
    daily_ad_interval_secs: u32,
}

impl Default for TrainerSettings {
    /// 100 questions per stage, 95% to pass, 100 stages, 1s pause after a
    /// correct answer, an interstitial every 20 questions, one daily ad.
    fn default() -> Self {
        Self {
            questions_per_stage: 100,
            pass_threshold_percent: 95,
            stage_count: 100,
            answer_delay_ms: 1_000,
            ad_interval_questions: 20,
            daily_ad_interval_secs: 86_400,
        }
    }
}

impl TrainerSettings {
    /// Build validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when a count is zero or the threshold is out of range.
    pub fn new(
        questions_per_stage: u32,
        pass_threshold_percent: u32,
        stage_count: u32,
        answer_delay_ms: u64,
        ad_interval_questions: u32,
        daily_ad_interval_secs: u32,
    ) -> Result<Self, SettingsError> {
        if questions_per_stage == 0 {
            return Err(SettingsError::InvalidQuestionsPerStage);
        }
        if !(1..=100).contains(&pass_threshold_percent) {
            return Err(SettingsError::InvalidPassThreshold);
        }
        if stage_count == 0 {
            return Err(SettingsError::InvalidStageCount);
        }
        if ad_interval_questions == 0 {
            return Err(SettingsError::InvalidAdInterval);
        }

        Ok(Self {
            questions_per_stage,
            pass_threshold_percent,
            stage_count,
            answer_delay_ms,
            ad_interval_questions,
            daily_ad_interval_secs,
        })
    }

    /// Copy of these settings with a different stage length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionsPerStage` for zero.
    pub fn with_questions_per_stage(&self, questions_per_stage: u32) -> Result<Self, SettingsError> {
        Self::new(
            questions_per_stage,
            self.pass_threshold_percent,
            self.stage_count,
            self.answer_delay_ms,
            self.ad_interval_questions,
            self.daily_ad_interval_secs,
        )
    }

    #[must_use]
    pub fn questions_per_stage(&self) -> u32 {
        self.questions_per_stage
    }

    #[must_use]
    pub fn pass_threshold_percent(&self) -> u32 {
        self.pass_threshold_percent
    }

    #[must_use]
    pub fn stage_count(&self) -> u32 {
        self.stage_count
    }

    #[must_use]
    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }

    #[must_use]
    pub fn ad_interval_questions(&self) -> u32 {
        self.ad_interval_questions
    }

    #[must_use]
    pub fn daily_ad_interval_secs(&self) -> u32 {
        self.daily_ad_interval_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_app() {
        let settings = TrainerSettings::default();
        assert_eq!(settings.questions_per_stage(), 100);
        assert_eq!(settings.pass_threshold_percent(), 95);
        assert_eq!(settings.stage_count(), 100);
        assert_eq!(settings.answer_delay(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            TrainerSettings::new(0, 95, 100, 0, 20, 0).unwrap_err(),
            SettingsError::InvalidQuestionsPerStage
        );
        assert_eq!(
            TrainerSettings::new(10, 0, 100, 0, 20, 0).unwrap_err(),
            SettingsError::InvalidPassThreshold
        );
        assert_eq!(
            TrainerSettings::new(10, 101, 100, 0, 20, 0).unwrap_err(),
            SettingsError::InvalidPassThreshold
        );
        assert_eq!(
            TrainerSettings::new(10, 95, 0, 0, 20, 0).unwrap_err(),
            SettingsError::InvalidStageCount
        );
        assert_eq!(
            TrainerSettings::new(10, 95, 5, 0, 0, 0).unwrap_err(),
            SettingsError::InvalidAdInterval
        );
    }

    #[test]
    fn override_questions_per_stage() {
        let settings = TrainerSettings::default().with_questions_per_stage(10).unwrap();
        assert_eq!(settings.questions_per_stage(), 10);
        assert_eq!(settings.pass_threshold_percent(), 95);
        assert!(TrainerSettings::default().with_questions_per_stage(0).is_err());
    }
}
