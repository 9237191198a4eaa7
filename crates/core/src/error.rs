use thiserror::Error;

use crate::generator::GeneratorError;
use crate::model::{ArticleError, NounError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Article(#[from] ArticleError),
    #[error(transparent)]
    Noun(#[from] NounError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
