use artikel_core::model::{AdGateState, BaseArticle, GrammaticalCase, ProgressState, StageNumber};
use storage::json::JsonRepository;
use storage::repository::{AdGateRepository, ProgressRepository, StageRepository, StorageError};
use tempfile::TempDir;

fn stage(n: u32) -> StageNumber {
    StageNumber::new(n).unwrap()
}

fn repo(dir: &TempDir) -> JsonRepository {
    JsonRepository::new(dir.path().join("stages"), dir.path().join("state"))
}

const STAGE_ONE: &str = r#"[
  {
    "word": "Tisch",
    "article": "der",
    "meaning": "طاولة",
    "sentences": {
      "Nominativ": "___ Tisch ist groß.",
      "Akkusativ": "Ich kaufe ___ Tisch.",
      "Dativ": "Das Buch liegt auf ___ Tisch."
    }
  },
  { "word": "Lampe", "article": "die", "meaning": "مصباح", "sentences": {} }
]"#;

#[tokio::test]
async fn loads_stage_dataset_from_disk() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    std::fs::create_dir_all(repo.data_dir()).unwrap();
    std::fs::write(repo.stage_path(stage(1)), STAGE_ONE).unwrap();
    std::fs::write(repo.data_dir().join("stage_3.json"), "[]").unwrap();
    std::fs::write(repo.data_dir().join("notes.txt"), "ignored").unwrap();

    let nouns = repo.load_stage(stage(1)).await.unwrap();
    assert_eq!(nouns.len(), 2);
    assert_eq!(nouns[0].word(), "Tisch");
    assert_eq!(nouns[0].article(), BaseArticle::Der);
    assert_eq!(
        nouns[0].sentence_for(GrammaticalCase::Accusative),
        "Ich kaufe ___ Tisch."
    );
    assert_eq!(nouns[1].sentence_for(GrammaticalCase::Dative), "___ Lampe");

    assert_eq!(repo.list_stages().await.unwrap(), vec![stage(1), stage(3)]);
}

#[tokio::test]
async fn missing_and_malformed_stages_are_errors() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    assert!(repo.list_stages().await.unwrap().is_empty());
    assert!(matches!(
        repo.load_stage(stage(2)).await,
        Err(StorageError::NotFound)
    ));

    std::fs::create_dir_all(repo.data_dir()).unwrap();
    std::fs::write(repo.stage_path(stage(2)), "{ not json").unwrap();
    assert!(matches!(
        repo.load_stage(stage(2)).await,
        Err(StorageError::Serialization(_))
    ));

    std::fs::write(
        repo.stage_path(stage(2)),
        r#"[{"word": "Haus", "article": "dem", "meaning": "بيت", "sentences": {}}]"#,
    )
    .unwrap();
    assert!(matches!(
        repo.load_stage(stage(2)).await,
        Err(StorageError::InvalidRecord(_))
    ));
}

#[tokio::test]
async fn progress_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    assert!(repo.load_progress().await.unwrap().is_none());

    repo.save_progress(&ProgressState::new(stage(7)))
        .await
        .unwrap();
    let loaded = repo.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded.unlocked_stages(), 7);

    let raw = std::fs::read_to_string(repo.state_dir().join("progress.json")).unwrap();
    assert_eq!(raw, r#"{"unlocked":7}"#);
}

#[tokio::test]
async fn corrupt_progress_is_reported() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    std::fs::create_dir_all(repo.state_dir()).unwrap();

    std::fs::write(repo.state_dir().join("progress.json"), "garbage").unwrap();
    assert!(matches!(
        repo.load_progress().await,
        Err(StorageError::Serialization(_))
    ));

    std::fs::write(repo.state_dir().join("progress.json"), r#"{"unlocked":0}"#).unwrap();
    assert!(repo.load_progress().await.is_err());
}

#[tokio::test]
async fn ad_gate_defaults_missing_fields() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    std::fs::create_dir_all(repo.state_dir()).unwrap();
    std::fs::write(repo.state_dir().join("ad_data.json"), r#"{"question_count": 4}"#).unwrap();

    let state = repo.load_ad_gate().await.unwrap().unwrap();
    assert_eq!(state.questions_since_last_ad(), 4);
    assert_eq!(state.last_daily_ad(), 0);

    repo.save_ad_gate(&AdGateState::new(1_700_000_000, 0))
        .await
        .unwrap();
    let raw = std::fs::read_to_string(repo.state_dir().join("ad_data.json")).unwrap();
    assert_eq!(raw, r#"{"last_24h_ad":1700000000,"question_count":0}"#);
}
