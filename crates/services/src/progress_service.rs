use std::sync::Arc;

use tracing::{debug, error, warn};

use artikel_core::model::ProgressState;
use storage::repository::{ProgressRepository, StorageError};

/// Loads and saves unlocked-stage progress.
///
/// Neither direction is fatal: unreadable progress falls back to the default
/// (only stage 1 unlocked) and failed saves are logged and reported as `false`.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Saved progress, or the default when missing or corrupt.
    pub async fn load(&self) -> ProgressState {
        match self.repo.load_progress().await {
            Ok(Some(progress)) => {
                debug!(unlocked = progress.unlocked_stages(), "loaded progress");
                progress
            }
            Ok(None) => ProgressState::default(),
            Err(err) => {
                warn!(error = %err, "progress file unreadable; starting from stage 1");
                ProgressState::default()
            }
        }
    }

    /// Persist progress immediately. Returns whether the write succeeded.
    pub async fn save(&self, progress: &ProgressState) -> bool {
        match self.try_save(progress).await {
            Ok(()) => true,
            Err(err) => {
                error!(
                    error = %err,
                    unlocked = progress.unlocked_stages(),
                    "failed to save progress"
                );
                false
            }
        }
    }

    /// Persist progress, surfacing the storage error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn try_save(&self, progress: &ProgressState) -> Result<(), StorageError> {
        self.repo.save_progress(progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artikel_core::model::StageNumber;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn missing_progress_defaults_to_first_stage() {
        let service = ProgressService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.load().await.unlocked_stages(), 1);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let service = ProgressService::new(Arc::new(InMemoryRepository::new()));
        let progress = ProgressState::new(StageNumber::new(7).unwrap());
        assert!(service.save(&progress).await);
        assert_eq!(service.load().await.unlocked_stages(), 7);
    }

    #[tokio::test]
    async fn failed_save_is_reported_not_raised() {
        let repo = InMemoryRepository::new();
        repo.set_fail_writes(true);
        let service = ProgressService::new(Arc::new(repo));
        let progress = ProgressState::new(StageNumber::new(3).unwrap());

        assert!(!service.save(&progress).await);
        assert!(service.try_save(&progress).await.is_err());
        assert_eq!(service.load().await.unlocked_stages(), 1);
    }
}
