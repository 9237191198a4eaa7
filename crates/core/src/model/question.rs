use crate::model::article::{Article, GrammaticalCase};
use crate::model::noun::Noun;

/// Number of options shown for both the article and the meaning.
pub const OPTIONS_PER_QUESTION: usize = 3;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One turn of a stage: a noun in a case, with article and meaning choices.
///
/// Built by `generator::generate`. Both option lists hold exactly
/// `OPTIONS_PER_QUESTION` distinct values, one of which is correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub(crate) noun: Noun,
    pub(crate) case: GrammaticalCase,
    pub(crate) correct_article: Article,
    pub(crate) sentence: String,
    pub(crate) article_options: [Article; OPTIONS_PER_QUESTION],
    pub(crate) meaning_options: [String; OPTIONS_PER_QUESTION],
}

impl Question {
    #[must_use]
    pub fn noun(&self) -> &Noun {
        &self.noun
    }

    #[must_use]
    pub fn case(&self) -> GrammaticalCase {
        self.case
    }

    #[must_use]
    pub fn correct_article(&self) -> Article {
        self.correct_article
    }

    #[must_use]
    pub fn correct_meaning(&self) -> &str {
        self.noun.meaning()
    }

    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    #[must_use]
    pub fn article_options(&self) -> &[Article; OPTIONS_PER_QUESTION] {
        &self.article_options
    }

    #[must_use]
    pub fn meaning_options(&self) -> &[String; OPTIONS_PER_QUESTION] {
        &self.meaning_options
    }

    /// Grade a selection against this question.
    ///
    /// Returns `None` while the selection is incomplete. The answer is correct
    /// only when both the case-inflected article and the meaning match.
    #[must_use]
    pub fn grade(&self, selection: &AnswerSelection) -> Option<AnswerFeedback> {
        let (article, meaning) = selection.parts()?;
        let article_correct = article == self.correct_article;
        let meaning_correct = meaning == self.correct_meaning();
        Some(AnswerFeedback {
            article_correct,
            meaning_correct,
            correct_article: self.correct_article,
            word: self.noun.word().to_owned(),
            correct_meaning: self.correct_meaning().to_owned(),
        })
    }
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// The player's in-progress choice for the current question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSelection {
    article: Option<Article>,
    meaning: Option<String>,
}

impl AnswerSelection {
    pub fn select_article(&mut self, article: Article) {
        self.article = Some(article);
    }

    pub fn select_meaning(&mut self, meaning: impl Into<String>) {
        self.meaning = Some(meaning.into());
    }

    #[must_use]
    pub fn article(&self) -> Option<Article> {
        self.article
    }

    #[must_use]
    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    /// True once both an article and a meaning have been chosen.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.article.is_some() && self.meaning.is_some()
    }

    pub fn clear(&mut self) {
        self.article = None;
        self.meaning = None;
    }

    fn parts(&self) -> Option<(Article, &str)> {
        Some((self.article?, self.meaning.as_deref()?))
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Outcome of grading one answer, with what the player should have picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub article_correct: bool,
    pub meaning_correct: bool,
    pub correct_article: Article,
    pub word: String,
    pub correct_meaning: String,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.article_correct && self.meaning_correct
    }
}
