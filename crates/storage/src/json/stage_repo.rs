use async_trait::async_trait;
use tracing::{debug, warn};

use artikel_core::model::{Noun, StageNumber};

use super::{JsonRepository, parse_stage_file_name, read_json, write_json};
use crate::repository::{NounRecord, StageRepository, StorageError};

#[async_trait]
impl StageRepository for JsonRepository {
    async fn load_stage(&self, stage: StageNumber) -> Result<Vec<Noun>, StorageError> {
        let path = self.stage_path(stage);
        let records: Vec<NounRecord> = read_json(&path).await?;
        let nouns = records
            .into_iter()
            .map(NounRecord::into_noun)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(%stage, nouns = nouns.len(), "loaded stage dataset");
        Ok(nouns)
    }

    async fn list_stages(&self) -> Result<Vec<StageNumber>, StorageError> {
        let mut entries = match tokio::fs::read_dir(self.data_dir()).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(dir = %self.data_dir().display(), "stage directory does not exist");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut stages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if let Some(stage) = name
                .to_str()
                .and_then(parse_stage_file_name)
                .and_then(StageNumber::new)
            {
                stages.push(stage);
            }
        }
        stages.sort();
        Ok(stages)
    }
}

impl JsonRepository {
    /// Write a stage dataset, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be written.
    pub async fn write_stage(&self, stage: StageNumber, nouns: &[Noun]) -> Result<(), StorageError> {
        let records: Vec<NounRecord> = nouns.iter().map(NounRecord::from_noun).collect();
        write_json(&self.stage_path(stage), &records).await
    }
}
