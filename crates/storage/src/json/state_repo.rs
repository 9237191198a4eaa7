use async_trait::async_trait;

use artikel_core::model::{AdGateState, ProgressState};

use super::{AD_GATE_FILE, JsonRepository, PROGRESS_FILE, read_json, write_json};
use crate::repository::{AdGateRepository, ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for JsonRepository {
    async fn load_progress(&self) -> Result<Option<ProgressState>, StorageError> {
        match read_json(&self.state_path(PROGRESS_FILE)).await {
            Ok(progress) => Ok(Some(progress)),
            Err(StorageError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn save_progress(&self, progress: &ProgressState) -> Result<(), StorageError> {
        write_json(&self.state_path(PROGRESS_FILE), progress).await
    }
}

#[async_trait]
impl AdGateRepository for JsonRepository {
    async fn load_ad_gate(&self) -> Result<Option<AdGateState>, StorageError> {
        match read_json(&self.state_path(AD_GATE_FILE)).await {
            Ok(state) => Ok(Some(state)),
            Err(StorageError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn save_ad_gate(&self, state: &AdGateState) -> Result<(), StorageError> {
        write_json(&self.state_path(AD_GATE_FILE), state).await
    }
}
