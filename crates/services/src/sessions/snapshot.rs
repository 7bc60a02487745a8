use trivia_core::model::{MediaRef, Question};

/// Renderable view of a question: prompt, options, and attachments.
///
/// Deliberately omits the correct answer; the presentation layer learns it
/// only from an `AnswerOutcome` after the question is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<String>,
    pub image: Option<MediaRef>,
    pub audio: Option<MediaRef>,
}

impl QuestionView {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            image: question.image().cloned(),
            audio: question.audio().cloned(),
        }
    }
}

/// Read-only state of a session for one render pass.
///
/// `position` is 1-based for display; `question` is `None` once the session
/// is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub participant: String,
    pub position: usize,
    pub total: usize,
    pub question: Option<QuestionView>,
    pub score: u32,
    pub answered: bool,
    pub remaining_fraction: f64,
    pub is_complete: bool,
    pub is_finished: bool,
}
