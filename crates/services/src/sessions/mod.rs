mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::StageSession;
pub use view::{MeaningOption, QuestionView, StageMenuItem, build_stage_menu};
pub use workflow::{AnswerOutcome, StageLoopService, StageResult};
