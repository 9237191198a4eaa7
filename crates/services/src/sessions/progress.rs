use artikel_core::model::StageNumber;

/// Aggregated view of stage progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub stage: StageNumber,
    /// One-based number of the question on screen, capped at `total`.
    pub question_index: u32,
    pub total: u32,
    pub answered: u32,
    pub correct: u32,
    pub is_complete: bool,
}
