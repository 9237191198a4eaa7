use artikel_core::model::{Article, OPTIONS_PER_QUESTION, ProgressState, Question, StageNumber};

use super::service::StageSession;
use crate::text::TextRenderer;

/// A meaning choice: `value` is what gets graded, `label` what gets drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeaningOption {
    pub value: String,
    pub label: String,
}

/// Snapshot of the current question for a front-end.
///
/// No localized chrome here; the front-end decides how to phrase the header
/// and feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub stage: StageNumber,
    pub question_index: u32,
    pub total: u32,
    pub sentence: String,
    pub article_options: [Article; OPTIONS_PER_QUESTION],
    pub meaning_options: [MeaningOption; OPTIONS_PER_QUESTION],
    pub selected_article: Option<Article>,
    pub selected_meaning: Option<String>,
    pub can_submit: bool,
}

impl QuestionView {
    /// Build the view of the session's current question, `None` once the
    /// stage is finished.
    #[must_use]
    pub fn from_session(session: &StageSession, renderer: &dyn TextRenderer) -> Option<Self> {
        let question: &Question = session.current_question()?;
        let meaning_options = question.meaning_options().clone().map(|value| MeaningOption {
            label: renderer.render(&value),
            value,
        });
        let selection = session.selection();

        Some(Self {
            stage: session.stage(),
            question_index: session.question_index(),
            total: session.questions_per_stage(),
            sentence: question.sentence().to_owned(),
            article_options: *question.article_options(),
            meaning_options,
            selected_article: selection.article(),
            selected_meaning: selection.meaning().map(str::to_owned),
            can_submit: selection.is_ready() && !session.is_answered(),
        })
    }
}

/// One entry of the stage-select screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageMenuItem {
    pub stage: StageNumber,
    pub unlocked: bool,
    pub has_content: bool,
}

/// Lay out stages `1..=stage_count` with lock state and dataset availability.
///
/// `available` lists stages that have a dataset; `None` means availability is
/// unknown and every stage is shown as having content.
#[must_use]
pub fn build_stage_menu(
    stage_count: u32,
    progress: &ProgressState,
    available: Option<&[StageNumber]>,
) -> Vec<StageMenuItem> {
    (1..=stage_count)
        .filter_map(StageNumber::new)
        .map(|stage| StageMenuItem {
            stage,
            unlocked: progress.is_unlocked(stage),
            has_content: available.is_none_or(|stages| stages.contains(&stage)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use artikel_core::model::{BaseArticle, Noun};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    struct Bracketed;

    impl TextRenderer for Bracketed {
        fn render(&self, text: &str) -> String {
            format!("[{text}]")
        }
    }

    fn stage(n: u32) -> StageNumber {
        StageNumber::new(n).unwrap()
    }

    #[test]
    fn view_renders_labels_but_keeps_raw_values() {
        let nouns = vec![
            Noun::new("Tisch", BaseArticle::Der, "طاولة", BTreeMap::new()).unwrap(),
            Noun::new("Lampe", BaseArticle::Die, "مصباح", BTreeMap::new()).unwrap(),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = StageSession::start(stage(2), nouns, 5, &mut rng).unwrap();

        let view = QuestionView::from_session(&session, &Bracketed).unwrap();
        assert_eq!(view.stage, stage(2));
        assert_eq!(view.question_index, 1);
        assert_eq!(view.total, 5);
        assert!(!view.can_submit);
        for option in &view.meaning_options {
            assert_eq!(option.label, format!("[{}]", option.value));
        }

        let q = session.current_question().unwrap().clone();
        session.select_article(q.correct_article());
        session.select_meaning(view.meaning_options[0].value.clone());
        let view = QuestionView::from_session(&session, &Bracketed).unwrap();
        assert!(view.can_submit);
        assert_eq!(view.selected_article, Some(q.correct_article()));
    }

    #[test]
    fn stage_menu_marks_locked_and_missing_stages() {
        let progress = ProgressState::new(stage(2));
        let available = [stage(1), stage(3)];
        let menu = build_stage_menu(4, &progress, Some(&available));

        assert_eq!(menu.len(), 4);
        assert!(menu[0].unlocked && menu[0].has_content);
        assert!(menu[1].unlocked && !menu[1].has_content);
        assert!(!menu[2].unlocked && menu[2].has_content);
        assert!(!menu[3].unlocked);

        let unknown = build_stage_menu(2, &progress, None);
        assert!(unknown.iter().all(|item| item.has_content));
    }
}
