use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::repository::{AdGateRepository, ProgressRepository, StageRepository, Storage, StorageError};

mod stage_repo;
mod state_repo;

pub(crate) const PROGRESS_FILE: &str = "progress.json";
pub(crate) const AD_GATE_FILE: &str = "ad_data.json";

/// File-backed repository.
///
/// Stage datasets are read from `data_dir/stage_{n}.json`; progress and
/// ad-gate state are small JSON documents in `state_dir`.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    data_dir: PathBuf,
    state_dir: PathBuf,
}

impl JsonRepository {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            state_dir: state_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    #[must_use]
    pub fn stage_path(&self, stage: artikel_core::model::StageNumber) -> PathBuf {
        self.data_dir.join(stage_file_name(stage.value()))
    }

    pub(crate) fn state_path(&self, file: &str) -> PathBuf {
        self.state_dir.join(file)
    }
}

pub(crate) fn stage_file_name(stage: u32) -> String {
    format!("stage_{stage}.json")
}

/// Inverse of `stage_file_name`.
pub(crate) fn parse_stage_file_name(name: &str) -> Option<u32> {
    name.strip_prefix("stage_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), len = bytes.len(), "read json document");
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write through a sibling temp file and rename, so a crash never leaves a
/// half-written document behind.
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let bytes = serde_json::to_vec(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!(path = %path.display(), len = bytes.len(), "wrote json document");
    Ok(())
}

impl Storage {
    /// Build a `Storage` backed by JSON files.
    #[must_use]
    pub fn json(data_dir: impl Into<PathBuf>, state_dir: impl Into<PathBuf>) -> Self {
        let repo = JsonRepository::new(data_dir, state_dir);
        let stages: Arc<dyn StageRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let ad_gate: Arc<dyn AdGateRepository> = Arc::new(repo);
        Self {
            stages,
            progress,
            ad_gate,
        }
    }
}
