use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use artikel_core::generator;
use artikel_core::model::{
    AnswerFeedback, AnswerSelection, Article, Noun, Question, StageNumber,
};
use artikel_core::scoring::ScoringPolicy;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one stage being played.
///
/// Holds the full dataset plus a shuffled working pool that the question
/// generator drains and refills. `question_index` is one-based and moves past
/// `questions_per_stage` once the stage is finished.
pub struct StageSession {
    stage: StageNumber,
    nouns: Vec<Noun>,
    remaining: Vec<Noun>,
    question_index: u32,
    questions_per_stage: u32,
    correct_count: u32,
    current: Option<Question>,
    selection: AnswerSelection,
    answered: bool,
}

impl StageSession {
    /// Start a stage: shuffle the pool, zero the counters and draw question 1.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyStage` if `nouns` is empty.
    pub fn start<R: Rng + ?Sized>(
        stage: StageNumber,
        nouns: Vec<Noun>,
        questions_per_stage: u32,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if nouns.is_empty() {
            return Err(SessionError::EmptyStage { stage });
        }

        let mut remaining = nouns.clone();
        remaining.shuffle(rng);

        let mut session = Self {
            stage,
            nouns,
            remaining,
            question_index: 1,
            questions_per_stage,
            correct_count: 0,
            current: None,
            selection: AnswerSelection::default(),
            answered: false,
        };
        session.next_question(rng)?;
        Ok(session)
    }

    #[must_use]
    pub fn stage(&self) -> StageNumber {
        self.stage
    }

    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn questions_per_stage(&self) -> u32 {
        self.questions_per_stage
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Nouns left in the working pool before the next refill.
    #[must_use]
    pub fn remaining_nouns(&self) -> &[Noun] {
        &self.remaining
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> &AnswerSelection {
        &self.selection
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.question_index > self.questions_per_stage
    }

    #[must_use]
    pub fn score_percent(&self) -> u32 {
        ScoringPolicy::score_percent(self.correct_count, self.questions_per_stage)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self
            .question_index
            .saturating_sub(1)
            .saturating_add(u32::from(self.answered))
            .min(self.questions_per_stage);
        SessionProgress {
            stage: self.stage,
            question_index: self.question_index.min(self.questions_per_stage),
            total: self.questions_per_stage,
            answered,
            correct: self.correct_count,
            is_complete: self.is_complete(),
        }
    }

    pub fn select_article(&mut self, article: Article) {
        self.selection.select_article(article);
    }

    pub fn select_meaning(&mut self, meaning: impl Into<String>) {
        self.selection.select_meaning(meaning);
    }

    /// Count the answer to the current question toward the stage score.
    ///
    /// Only the first record per question counts; returns false for repeats
    /// and after the stage ended.
    pub fn record_answer(&mut self, is_correct: bool) -> bool {
        if self.answered || self.current.is_none() {
            return false;
        }
        self.answered = true;
        if is_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        true
    }

    /// Grade the current selection and record it. Each question is graded once.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the stage ended,
    /// `SessionError::AlreadyAnswered` on a second submission and
    /// `SessionError::NotReady` while the selection is incomplete.
    pub fn grade_selection(&mut self) -> Result<AnswerFeedback, SessionError> {
        let question = self.current.as_ref().ok_or(SessionError::Completed)?;
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let feedback = question
            .grade(&self.selection)
            .ok_or(SessionError::NotReady)?;

        self.record_answer(feedback.is_correct());
        Ok(feedback)
    }

    /// Move to the next question.
    ///
    /// Returns `true` once the stage is finished, in which case no new
    /// question is drawn.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the stage had already finished.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }

        self.question_index += 1;
        if self.is_complete() {
            self.current = None;
            self.selection.clear();
            self.answered = false;
            return Ok(true);
        }

        self.next_question(rng)?;
        Ok(false)
    }

    fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        let question = generator::generate(&mut self.remaining, &self.nouns, rng)?;
        self.current = Some(question);
        self.selection.clear();
        self.answered = false;
        Ok(())
    }
}

impl fmt::Debug for StageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageSession")
            .field("stage", &self.stage)
            .field("nouns_len", &self.nouns.len())
            .field("remaining_len", &self.remaining.len())
            .field("question_index", &self.question_index)
            .field("questions_per_stage", &self.questions_per_stage)
            .field("correct_count", &self.correct_count)
            .field("answered", &self.answered)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use artikel_core::model::BaseArticle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    fn nouns(count: usize) -> Vec<Noun> {
        let pool = [
            ("Tisch", BaseArticle::Der, "طاولة"),
            ("Lampe", BaseArticle::Die, "مصباح"),
            ("Buch", BaseArticle::Das, "كتاب"),
            ("Stuhl", BaseArticle::Der, "كرسي"),
            ("Tür", BaseArticle::Die, "باب"),
        ];
        pool.iter()
            .take(count)
            .map(|(w, a, m)| Noun::new(*w, *a, *m, BTreeMap::new()).unwrap())
            .collect()
    }

    fn stage(n: u32) -> StageNumber {
        StageNumber::new(n).unwrap()
    }

    fn answer_correctly(session: &mut StageSession) -> AnswerFeedback {
        let q = session.current_question().unwrap().clone();
        session.select_article(q.correct_article());
        session.select_meaning(q.correct_meaning());
        session.grade_selection().unwrap()
    }

    #[test]
    fn empty_stage_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = StageSession::start(stage(1), Vec::new(), 10, &mut rng).unwrap_err();
        assert!(matches!(err, SessionError::EmptyStage { .. }));
    }

    #[test]
    fn start_draws_first_question() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = StageSession::start(stage(4), nouns(5), 10, &mut rng).unwrap();
        assert_eq!(session.question_index(), 1);
        assert_eq!(session.correct_count(), 0);
        assert!(session.current_question().is_some());
        assert_eq!(session.remaining_nouns().len(), 4);
    }

    #[test]
    fn advance_is_terminal_exactly_on_last_call() {
        let mut rng = StdRng::seed_from_u64(2);
        let n = 7;
        let mut session = StageSession::start(stage(1), nouns(3), n, &mut rng).unwrap();
        for call in 1..=n {
            let done = session.advance(&mut rng).unwrap();
            assert_eq!(done, call == n, "call {call}");
        }
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert!(matches!(
            session.advance(&mut rng),
            Err(SessionError::Completed)
        ));
    }

    #[test]
    fn small_stage_reshuffles_after_exhaustion() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = StageSession::start(stage(1), nouns(3), 100, &mut rng).unwrap();
        let mut seen = vec![
            session.current_question().unwrap().noun().word().to_owned(),
        ];
        for _ in 0..2 {
            session.advance(&mut rng).unwrap();
            seen.push(session.current_question().unwrap().noun().word().to_owned());
        }
        assert!(session.remaining_nouns().is_empty());
        seen.sort();
        assert_eq!(seen, vec!["Buch", "Lampe", "Tisch"]);

        session.advance(&mut rng).unwrap();
        assert_eq!(session.remaining_nouns().len(), 2);
        session.advance(&mut rng).unwrap();
        assert_eq!(session.remaining_nouns().len(), 1);
    }

    #[test]
    fn grading_counts_correct_answers_once() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = StageSession::start(stage(1), nouns(5), 3, &mut rng).unwrap();

        assert!(matches!(
            session.grade_selection(),
            Err(SessionError::NotReady)
        ));
        assert!(answer_correctly(&mut session).is_correct());
        assert!(matches!(
            session.grade_selection(),
            Err(SessionError::AlreadyAnswered)
        ));
        assert_eq!(session.correct_count(), 1);

        session.advance(&mut rng).unwrap();
        assert!(!session.selection().is_ready());
        let q = session.current_question().unwrap().clone();
        let wrong = q
            .article_options()
            .iter()
            .copied()
            .find(|a| *a != q.correct_article())
            .unwrap();
        session.select_article(wrong);
        session.select_meaning(q.correct_meaning());
        let feedback = session.grade_selection().unwrap();
        assert!(!feedback.is_correct());
        assert_eq!(session.correct_count(), 1);

        let progress = session.progress();
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.correct, 1);
        assert_eq!(progress.question_index, 2);
    }

    #[test]
    fn record_answer_only_counts_true() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = StageSession::start(stage(1), nouns(2), 100, &mut rng).unwrap();
        for is_correct in [true, false, true] {
            assert!(session.record_answer(is_correct));
            session.advance(&mut rng).unwrap();
        }
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.score_percent(), 2);
    }

    #[test]
    fn graded_answer_cannot_be_recorded_again() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = StageSession::start(stage(1), nouns(3), 1, &mut rng).unwrap();
        assert!(answer_correctly(&mut session).is_correct());

        assert!(!session.record_answer(true));
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.score_percent(), 100);

        assert!(session.advance(&mut rng).unwrap());
        assert!(!session.record_answer(true));
        assert_eq!(session.correct_count(), 1);
    }
}
