use artikel_core::model::{
    AdGateState, ArticleError, BaseArticle, GrammaticalCase, Noun, NounError, ProgressState,
    StageNumber,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid noun record: {0}")]
    InvalidRecord(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound
        } else {
            StorageError::Io(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Persisted shape of one dataset entry.
///
/// `sentences` keys are case names; keys that are not a known case are
/// dropped when converting to a domain `Noun`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounRecord {
    pub word: String,
    pub article: String,
    pub meaning: String,
    #[serde(default)]
    pub sentences: BTreeMap<String, String>,
}

impl NounRecord {
    #[must_use]
    pub fn from_noun(noun: &Noun) -> Self {
        Self {
            word: noun.word().to_owned(),
            article: noun.article().to_string(),
            meaning: noun.meaning().to_owned(),
            sentences: noun
                .sentences()
                .iter()
                .map(|(case, sentence)| (case.dataset_key().to_owned(), sentence.clone()))
                .collect(),
        }
    }

    /// Convert the record back into a domain `Noun`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the article is not der/die/das
    /// or the noun fails validation.
    pub fn into_noun(self) -> Result<Noun, StorageError> {
        let article: BaseArticle = self
            .article
            .parse()
            .map_err(|err: ArticleError| invalid(&self.word, &err))?;
        let sentences = self
            .sentences
            .into_iter()
            .filter_map(|(key, sentence)| {
                key.parse::<GrammaticalCase>()
                    .ok()
                    .map(|case| (case, sentence))
            })
            .collect();
        Noun::new(self.word.clone(), article, self.meaning, sentences)
            .map_err(|err: NounError| invalid(&self.word, &err))
    }
}

fn invalid(word: &str, err: &dyn std::fmt::Display) -> StorageError {
    StorageError::InvalidRecord(format!("`{word}`: {err}"))
}

/// Read-only per-stage noun datasets.
#[async_trait]
pub trait StageRepository: Send + Sync {
    /// Load every noun of a stage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no dataset exists for `stage`, or
    /// other storage errors for unreadable or malformed datasets.
    async fn load_stage(&self, stage: StageNumber) -> Result<Vec<Noun>, StorageError>;

    /// Stage numbers that have a dataset, ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be listed.
    async fn list_stages(&self) -> Result<Vec<StageNumber>, StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch saved progress, `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the saved progress is unreadable.
    async fn load_progress(&self) -> Result<Option<ProgressState>, StorageError>;

    /// Persist progress, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the progress cannot be written.
    async fn save_progress(&self, progress: &ProgressState) -> Result<(), StorageError>;
}

#[async_trait]
pub trait AdGateRepository: Send + Sync {
    /// Fetch saved ad-gate counters, `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the saved state is unreadable.
    async fn load_ad_gate(&self) -> Result<Option<AdGateState>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be written.
    async fn save_ad_gate(&self, state: &AdGateState) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    stages: Arc<Mutex<HashMap<StageNumber, Vec<Noun>>>>,
    progress: Arc<Mutex<Option<ProgressState>>>,
    ad_gate: Arc<Mutex<Option<AdGateState>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the dataset for a stage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the lock is poisoned.
    pub fn insert_stage(&self, stage: StageNumber, nouns: Vec<Noun>) -> Result<(), StorageError> {
        let mut guard = self
            .stages
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(stage, nouns);
        Ok(())
    }

    /// Make every subsequent save fail, to exercise write-failure paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("writes disabled".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl StageRepository for InMemoryRepository {
    async fn load_stage(&self, stage: StageNumber) -> Result<Vec<Noun>, StorageError> {
        let guard = self
            .stages
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.get(&stage).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_stages(&self) -> Result<Vec<StageNumber>, StorageError> {
        let guard = self
            .stages
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let mut stages: Vec<_> = guard.keys().copied().collect();
        stages.sort();
        Ok(stages)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<ProgressState>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_progress(&self, progress: &ProgressState) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(*progress);
        Ok(())
    }
}

#[async_trait]
impl AdGateRepository for InMemoryRepository {
    async fn load_ad_gate(&self) -> Result<Option<AdGateState>, StorageError> {
        let guard = self
            .ad_gate
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_ad_gate(&self, state: &AdGateState) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut guard = self
            .ad_gate
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(*state);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stages: Arc<dyn StageRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub ad_gate: Arc<dyn AdGateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn record(article: &str) -> NounRecord {
        let mut sentences = BTreeMap::new();
        sentences.insert("Dativ".to_owned(), "mit ___ Lampe".to_owned());
        sentences.insert("Genitiv".to_owned(), "wegen ___ Lampe".to_owned());
        NounRecord {
            word: "Lampe".into(),
            article: article.into(),
            meaning: "مصباح".into(),
            sentences,
        }
    }

    #[test]
    fn record_converts_known_cases_only() {
        let noun = record("die").into_noun().unwrap();
        assert_eq!(noun.article(), BaseArticle::Die);
        assert_eq!(noun.sentences().len(), 1);
        assert_eq!(noun.sentence_for(GrammaticalCase::Dative), "mit ___ Lampe");

        let back = NounRecord::from_noun(&noun);
        assert_eq!(back.article, "die");
        assert!(back.sentences.contains_key("Dativ"));
    }

    #[test]
    fn record_rejects_inflected_article() {
        let err = record("dem").into_noun().unwrap_err();
        assert!(matches!(err, StorageError::InvalidRecord(msg) if msg.contains("Lampe")));
    }

    #[tokio::test]
    async fn in_memory_round_trips_progress_and_stages() {
        let repo = InMemoryRepository::new();
        let stage = StageNumber::new(2).unwrap();
        assert!(matches!(
            repo.load_stage(stage).await,
            Err(StorageError::NotFound)
        ));

        repo.insert_stage(stage, vec![record("die").into_noun().unwrap()])
            .unwrap();
        assert_eq!(repo.load_stage(stage).await.unwrap().len(), 1);
        assert_eq!(repo.list_stages().await.unwrap(), vec![stage]);

        assert!(repo.load_progress().await.unwrap().is_none());
        let progress = ProgressState::new(StageNumber::new(7).unwrap());
        repo.save_progress(&progress).await.unwrap();
        assert_eq!(repo.load_progress().await.unwrap(), Some(progress));
    }

    #[tokio::test]
    async fn failing_writes_leave_state_untouched() {
        let repo = InMemoryRepository::new();
        repo.set_fail_writes(true);
        let err = repo
            .save_ad_gate(&AdGateState::new(1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(repo.load_ad_gate().await.unwrap().is_none());
    }
}
