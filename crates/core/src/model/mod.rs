mod ad_gate;
mod article;
mod ids;
mod noun;
mod progress;
mod question;
mod settings;

pub use ad_gate::AdGateState;
pub use article::{Article, ArticleError, BaseArticle, GrammaticalCase};
pub use ids::{ParseStageNumberError, StageNumber};
pub use noun::{Noun, NounError};
pub use progress::ProgressState;
pub use question::{AnswerFeedback, AnswerSelection, OPTIONS_PER_QUESTION, Question};
pub use settings::{SettingsError, TrainerSettings};
