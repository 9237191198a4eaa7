use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::article::{BaseArticle, GrammaticalCase};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NounError {
    #[error("noun word cannot be empty")]
    EmptyWord,

    #[error("meaning of `{word}` cannot be empty")]
    EmptyMeaning { word: String },
}

//
// ─── NOUN ──────────────────────────────────────────────────────────────────────
//

/// A vocabulary item of a stage dataset.
///
/// `meaning` may be in a right-to-left script; it is stored exactly as loaded
/// and only shaped for display by a `TextRenderer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Noun {
    word: String,
    article: BaseArticle,
    meaning: String,
    sentences: BTreeMap<GrammaticalCase, String>,
}

impl Noun {
    /// Build a validated noun.
    ///
    /// # Errors
    ///
    /// Returns `NounError` if `word` or `meaning` is blank.
    pub fn new(
        word: impl Into<String>,
        article: BaseArticle,
        meaning: impl Into<String>,
        sentences: BTreeMap<GrammaticalCase, String>,
    ) -> Result<Self, NounError> {
        let word = word.into().trim().to_owned();
        if word.is_empty() {
            return Err(NounError::EmptyWord);
        }
        let meaning = meaning.into();
        if meaning.trim().is_empty() {
            return Err(NounError::EmptyMeaning { word });
        }

        Ok(Self {
            word,
            article,
            meaning,
            sentences,
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn article(&self) -> BaseArticle {
        self.article
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    #[must_use]
    pub fn sentences(&self) -> &BTreeMap<GrammaticalCase, String> {
        &self.sentences
    }

    /// Sentence template for `case`, or `"___ {word}"` when the dataset has none.
    #[must_use]
    pub fn sentence_for(&self, case: GrammaticalCase) -> String {
        self.sentences
            .get(&case)
            .cloned()
            .unwrap_or_else(|| format!("___ {}", self.word))
    }
}
