//! Error types for the services crate.

use thiserror::Error;

use artikel_core::generator::GeneratorError;
use artikel_core::model::StageNumber;
use storage::repository::StorageError;

/// Errors emitted by stage sessions and the stage loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no dataset for stage {stage}: {source}")]
    DatasetMissing {
        stage: StageNumber,
        #[source]
        source: StorageError,
    },
    #[error("stage {stage} is locked (unlocked up to {unlocked})")]
    StageLocked { stage: StageNumber, unlocked: u32 },
    #[error("stage {stage} has no nouns")]
    EmptyStage { stage: StageNumber },
    #[error("an answer needs both an article and a meaning")]
    NotReady,
    #[error("the current question was already answered")]
    AlreadyAnswered,
    #[error("stage already completed")]
    Completed,
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

