use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use artikel_core::model::{BaseArticle, GrammaticalCase, Noun, StageNumber};
use storage::json::JsonRepository;
use storage::repository::{StageRepository, StorageError};

#[derive(Debug, Clone)]
struct Args {
    data_dir: PathBuf,
    state_dir: PathBuf,
    stage: StageNumber,
    force: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStage { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStage { raw } => write!(f, "invalid --stage value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("ARTIKEL_DATA_DIR")
            .map_or_else(|_| PathBuf::from("data/stages"), PathBuf::from);
        let state_dir = std::env::var("ARTIKEL_STATE_DIR")
            .map_or_else(|_| PathBuf::from("."), PathBuf::from);
        let mut stage = StageNumber::FIRST;
        let mut force = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    data_dir = PathBuf::from(require_value(&mut args, "--data")?);
                }
                "--stage" => {
                    let value = require_value(&mut args, "--stage")?;
                    stage = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidStage { raw: value.clone() })?;
                }
                "--force" => force = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            state_dir,
            stage,
            force,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <dir>     Stage dataset directory (default: data/stages)");
    eprintln!("  --stage <n>      Stage number to write (default: 1)");
    eprintln!("  --force          Overwrite an existing dataset");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ARTIKEL_DATA_DIR, ARTIKEL_STATE_DIR");
}

/// word, article, meaning, nominative / accusative / dative sentence
const SAMPLE: &[(&str, BaseArticle, &str, [&str; 3])] = &[
    (
        "Tisch",
        BaseArticle::Der,
        "طاولة",
        ["___ Tisch ist neu.", "Ich kaufe ___ Tisch.", "Das Buch liegt auf ___ Tisch."],
    ),
    (
        "Lampe",
        BaseArticle::Die,
        "مصباح",
        ["___ Lampe ist hell.", "Ich brauche ___ Lampe.", "Ich lese mit ___ Lampe."],
    ),
    (
        "Buch",
        BaseArticle::Das,
        "كتاب",
        ["___ Buch ist spannend.", "Ich lese ___ Buch.", "Ich lerne mit ___ Buch."],
    ),
    (
        "Stuhl",
        BaseArticle::Der,
        "كرسي",
        ["___ Stuhl ist bequem.", "Er repariert ___ Stuhl.", "Sie sitzt auf ___ Stuhl."],
    ),
    (
        "Tür",
        BaseArticle::Die,
        "باب",
        ["___ Tür ist offen.", "Ich schließe ___ Tür.", "Er steht vor ___ Tür."],
    ),
    (
        "Fenster",
        BaseArticle::Das,
        "نافذة",
        ["___ Fenster ist groß.", "Sie öffnet ___ Fenster.", "Die Katze sitzt an ___ Fenster."],
    ),
    (
        "Apfel",
        BaseArticle::Der,
        "تفاحة",
        ["___ Apfel ist rot.", "Ich esse ___ Apfel.", "Der Wurm ist in ___ Apfel."],
    ),
    (
        "Stadt",
        BaseArticle::Die,
        "مدينة",
        ["___ Stadt ist alt.", "Wir besuchen ___ Stadt.", "Wir wohnen in ___ Stadt."],
    ),
    (
        "Auto",
        BaseArticle::Das,
        "سيارة",
        ["___ Auto ist schnell.", "Er wäscht ___ Auto.", "Wir fahren mit ___ Auto."],
    ),
];

fn sample_nouns() -> Result<Vec<Noun>, Box<dyn std::error::Error>> {
    SAMPLE
        .iter()
        .map(|(word, article, meaning, sentences)| {
            let sentences: BTreeMap<_, _> = GrammaticalCase::ALL
                .into_iter()
                .zip(sentences.iter().map(|s| (*s).to_owned()))
                .collect();
            Noun::new(*word, *article, *meaning, sentences).map_err(Into::into)
        })
        .collect()
}

/// Write `nouns` as the dataset for `stage`.
///
/// Without `force` any existing file is left alone, including one that no
/// longer parses. Returns whether the dataset was written.
async fn seed_stage(
    repo: &JsonRepository,
    stage: StageNumber,
    nouns: &[Noun],
    force: bool,
) -> Result<bool, StorageError> {
    if !force {
        match repo.load_stage(stage).await {
            Err(StorageError::NotFound) => {}
            Ok(existing) => {
                eprintln!(
                    "stage {stage} already exists with {} nouns at {} (use --force to overwrite)",
                    existing.len(),
                    repo.stage_path(stage).display()
                );
                return Ok(false);
            }
            Err(err) => {
                eprintln!(
                    "stage {stage} exists at {} but cannot be read: {err} (use --force to overwrite)",
                    repo.stage_path(stage).display()
                );
                return Ok(false);
            }
        }
    }

    repo.write_stage(stage, nouns).await?;
    Ok(true)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = JsonRepository::new(&args.data_dir, &args.state_dir);
    let nouns = sample_nouns()?;
    if seed_stage(&repo, args.stage, &nouns, args.force).await? {
        eprintln!(
            "wrote {} nouns to {}",
            nouns.len(),
            repo.stage_path(args.stage).display()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
