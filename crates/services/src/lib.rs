#![forbid(unsafe_code)]

pub mod ads;
pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod sessions;
pub mod text;

pub use artikel_core::Clock;

pub use ads::{AdGateService, AdProvider, MockAdProvider, NoopAdProvider};
pub use app_services::AppServices;
pub use error::SessionError;
pub use progress_service::ProgressService;
pub use sessions::{
    AnswerOutcome, MeaningOption, QuestionView, SessionProgress, StageLoopService, StageMenuItem,
    StageResult, StageSession, build_stage_menu,
};
pub use text::{PlainTextRenderer, TextRenderer};
