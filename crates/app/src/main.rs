use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use artikel_core::model::{StageNumber, TrainerSettings};
use services::{AppServices, Clock, NoopAdProvider};
use tracing::info;

mod console;
mod telemetry;

use console::Console;

const DEFAULT_DATA_DIR: &str = "data/stages";
const DEFAULT_STATE_DIR: &str = ".";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStage { raw: String },
    InvalidQuestions { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStage { raw } => write!(f, "invalid --stage value: {raw}"),
            ArgsError::InvalidQuestions { raw } => write!(f, "invalid --questions value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play   [--data <dir>] [--state <dir>] [--stage <n>] [--questions <n>]");
    eprintln!("  cargo run -p app -- stages [--data <dir>] [--state <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data {DEFAULT_DATA_DIR}");
    eprintln!("  --state {DEFAULT_STATE_DIR}");
    eprintln!("  --questions 100");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ARTIKEL_DATA_DIR, ARTIKEL_STATE_DIR, ARTIKEL_QUESTIONS_PER_STAGE");
    eprintln!("  LOG_LEVEL (default info), LOG_FORMAT=json");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Stages,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "stages" => Some(Self::Stages),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    data_dir: PathBuf,
    state_dir: PathBuf,
    stage: Option<StageNumber>,
    questions_per_stage: Option<u32>,
}

impl Args {
    fn from_env() -> Self {
        Self {
            data_dir: std::env::var_os("ARTIKEL_DATA_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            state_dir: std::env::var_os("ARTIKEL_STATE_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from),
            stage: None,
            questions_per_stage: std::env::var("ARTIKEL_QUESTIONS_PER_STAGE")
                .ok()
                .and_then(|value| value.parse().ok()),
        }
    }

    fn parse(
        mut self,
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => self.data_dir = require_value(args, "--data")?.into(),
                "--state" => self.state_dir = require_value(args, "--state")?.into(),
                "--stage" if cmd == Command::Play => {
                    let value = require_value(args, "--stage")?;
                    let stage = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidStage { raw: value.clone() })?;
                    self.stage = Some(stage);
                }
                "--questions" if cmd == Command::Play => {
                    let value = require_value(args, "--questions")?;
                    let parsed = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ArgsError::InvalidQuestions { raw: value.clone() })?;
                    self.questions_per_stage = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }

    fn settings(&self) -> Result<TrainerSettings, Box<dyn std::error::Error>> {
        let defaults = TrainerSettings::default();
        match self.questions_per_stage {
            Some(questions) => Ok(defaults.with_questions_per_stage(questions)?),
            None => Ok(defaults),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means play.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::from_env()
        .parse(cmd, &mut argv.into_iter())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let settings = parsed.settings()?;

    telemetry::init_tracing();
    info!(
        data_dir = %parsed.data_dir.display(),
        state_dir = %parsed.state_dir.display(),
        questions_per_stage = settings.questions_per_stage(),
        "starting"
    );

    let app = AppServices::new_json(
        &parsed.data_dir,
        &parsed.state_dir,
        settings,
        Clock::System,
        Arc::new(NoopAdProvider),
    )
    .await;
    let mut progress = app.load_progress().await;
    let mut console = Console::new(app);

    match cmd {
        Command::Stages => console.print_stages(&progress).await,
        Command::Play => match parsed.stage {
            Some(stage) => console.play_stage(stage, &mut progress).await?,
            None => console.run_menu(&mut progress).await?,
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}
