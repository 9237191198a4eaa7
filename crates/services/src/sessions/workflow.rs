use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

use artikel_core::model::{AnswerFeedback, ProgressState, StageNumber, TrainerSettings};
use artikel_core::scoring::{ScoringPolicy, StageOutcome};
use storage::repository::StageRepository;

use super::service::StageSession;
use super::view::{StageMenuItem, build_stage_menu};
use crate::ads::AdGateService;
use crate::error::SessionError;
use crate::progress_service::ProgressService;

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub feedback: AnswerFeedback,
    /// An interstitial was shown after this answer.
    pub showed_ad: bool,
}

/// Result of a finished stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageResult {
    pub outcome: StageOutcome,
    pub unlocked_stages: u32,
    /// False when an unlock happened but could not be written to disk.
    pub progress_saved: bool,
}

/// Orchestrates stage start, answering, advancing and stage completion.
///
/// Progress is owned by the caller and passed in explicitly.
pub struct StageLoopService {
    settings: TrainerSettings,
    scoring: ScoringPolicy,
    stages: Arc<dyn StageRepository>,
    progress: ProgressService,
    ads: Arc<AdGateService>,
    rng: Mutex<StdRng>,
}

impl StageLoopService {
    #[must_use]
    pub fn new(
        settings: TrainerSettings,
        stages: Arc<dyn StageRepository>,
        progress: ProgressService,
        ads: Arc<AdGateService>,
    ) -> Self {
        Self {
            scoring: ScoringPolicy::from_settings(&settings),
            settings,
            stages,
            progress,
            ads,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Use a fixed seed for question generation.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Stage-select entries for `1..=stage_count`.
    pub async fn stage_menu(&self, progress: &ProgressState) -> Vec<StageMenuItem> {
        let available = match self.stages.list_stages().await {
            Ok(stages) => Some(stages),
            Err(err) => {
                warn!(error = %err, "could not list stage datasets");
                None
            }
        };
        build_stage_menu(self.settings.stage_count(), progress, available.as_deref())
    }

    /// Load a stage's dataset and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StageLocked` for stages beyond the frontier,
    /// `SessionError::DatasetMissing` if the dataset cannot be loaded and
    /// `SessionError::EmptyStage` if it has no nouns. No state is changed.
    #[instrument(level = "info", skip(self, progress), fields(%stage))]
    pub async fn start_stage(
        &self,
        stage: StageNumber,
        progress: &ProgressState,
    ) -> Result<StageSession, SessionError> {
        if !progress.is_unlocked(stage) {
            return Err(SessionError::StageLocked {
                stage,
                unlocked: progress.unlocked_stages(),
            });
        }

        let nouns = self
            .stages
            .load_stage(stage)
            .await
            .map_err(|source| {
                warn!(error = %source, "stage dataset unavailable");
                SessionError::DatasetMissing { stage, source }
            })?;

        let session = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            StageSession::start(
                stage,
                nouns,
                self.settings.questions_per_stage(),
                &mut *rng,
            )?
        };
        info!(
            nouns = session.remaining_nouns().len() + 1,
            questions = session.questions_per_stage(),
            "stage started"
        );
        Ok(session)
    }

    /// Grade the current selection, count it for the ad gate and show an
    /// interstitial if one is due.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from grading (incomplete selection, repeated
    /// submission, finished stage).
    pub async fn submit_answer(
        &self,
        session: &mut StageSession,
    ) -> Result<AnswerOutcome, SessionError> {
        let feedback = session.grade_selection()?;
        self.ads.record_question().await;
        let showed_ad = self.ads.show_periodic_ad_if_due().await;
        Ok(AnswerOutcome {
            feedback,
            showed_ad,
        })
    }

    /// Move to the next question, finishing the stage after the last one.
    ///
    /// Returns `Some(StageResult)` when the stage finished. A pass on the
    /// frontier stage unlocks the next stage in `progress` and saves it
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the stage had already finished.
    #[instrument(level = "debug", skip_all, fields(stage = %session.stage()))]
    pub async fn advance(
        &self,
        session: &mut StageSession,
        progress: &mut ProgressState,
    ) -> Result<Option<StageResult>, SessionError> {
        let finished = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            session.advance(&mut *rng)?
        };
        if !finished {
            return Ok(None);
        }
        Ok(Some(self.finish_stage(session, progress).await))
    }

    async fn finish_stage(&self, session: &StageSession, progress: &mut ProgressState) -> StageResult {
        let outcome = self.scoring.complete_stage(
            session.stage(),
            session.correct_count(),
            session.questions_per_stage(),
            progress,
        );
        let progress_saved = if outcome.unlocked_next {
            self.progress.save(progress).await
        } else {
            true
        };

        info!(
            stage = %outcome.stage,
            correct = outcome.correct,
            total = outcome.total,
            score = outcome.score_percent,
            passed = outcome.passed,
            unlocked_next = outcome.unlocked_next,
            "stage finished"
        );

        StageResult {
            outcome,
            unlocked_stages: progress.unlocked_stages(),
            progress_saved,
        }
    }
}
