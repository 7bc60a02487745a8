use chrono::{DateTime, Duration, Utc};
use std::fmt;

use trivia_core::model::{CatalogError, Question, QuizSettings, ResultRecord, SessionId};
use trivia_core::timer::QuestionTimer;

use crate::error::SessionError;
use super::snapshot::{QuestionView, SessionSnapshot};

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// What happened when the participant submitted a choice.
///
/// Carries the correct answer so the presentation layer can reveal it after
/// a wrong submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_answer: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One participant's run through a randomized ordering of the catalog.
///
/// The session owns quiz progression: which question is active, whether it
/// has been resolved (submitted or timed out), the running score, and the
/// cached final record once the run is complete. It never touches storage
/// or the wall clock itself; timestamps come from the caller.
pub struct QuizSession {
    id: SessionId,
    participant: String,
    order: Vec<Question>,
    current: usize,
    score: u32,
    answered: bool,
    timer: QuestionTimer,
    started_at: DateTime<Utc>,
    outcome: Option<ResultRecord>,
}

impl QuizSession {
    /// Create a session over an already-shuffled question order.
    ///
    /// `started_at` should come from the services layer clock; it seeds
    /// both the per-question timer and the total elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyName` for a blank participant name and
    /// `SessionError::Catalog` for an empty question order.
    pub fn new(
        participant: impl Into<String>,
        order: Vec<Question>,
        settings: &QuizSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let participant = participant.into();
        let participant = participant.trim().to_owned();
        if participant.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if order.is_empty() {
            return Err(SessionError::Catalog(CatalogError::Empty));
        }

        Ok(Self {
            id: SessionId::new(),
            participant,
            order,
            current: 0,
            score: 0,
            answered: false,
            timer: QuestionTimer::new(started_at, settings.time_limit()),
            started_at,
            outcome: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn participant(&self) -> &str {
        &self.participant
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.order.len()
    }

    /// Zero-based index of the active question; equals the total once the
    /// session is complete.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True once the active question has been resolved, by submission or
    /// by expiry.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.order.len()
    }

    /// True once the final record has been built via `finalize`.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The question currently on screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfQuestions` once the session is complete;
    /// callers must check `is_complete` first.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.order
            .get(self.current)
            .ok_or(SessionError::OutOfQuestions)
    }

    /// Time left on the active question, clamped at zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.timer.remaining(now)
    }

    /// Fraction of the per-question limit still remaining, in `[0, 1]`.
    #[must_use]
    pub fn remaining_fraction(&self, now: DateTime<Utc>) -> f64 {
        self.timer.fraction_remaining(now)
    }

    /// Submit the participant's choice for the active question.
    ///
    /// The choice is compared to the correct answer by exact string match;
    /// the score increments only on a match, and the question counts as
    /// resolved either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` on a complete session,
    /// `SessionError::AlreadyAnswered` if the question was already resolved
    /// (including by expiry), and `SessionError::UnknownChoice` if the
    /// choice is not one of the question's options. State is unchanged on
    /// every error.
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerOutcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }

        let question = &self.order[self.current];
        if !question.has_option(choice) {
            return Err(SessionError::UnknownChoice {
                choice: choice.to_owned(),
            });
        }

        let is_correct = question.is_correct(choice);
        if is_correct {
            self.score += 1;
        }
        self.answered = true;

        Ok(AnswerOutcome {
            is_correct,
            correct_answer: question.answer().to_owned(),
        })
    }

    /// Resolve the active question as unanswered if its time limit has
    /// elapsed.
    ///
    /// Level-triggered and safe to call on every poll: it does nothing
    /// while time remains, nothing once the question is resolved, and
    /// nothing on a complete session. Returns whether the expiry
    /// transition fired.
    pub fn expire_timer(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_complete() || self.answered {
            return false;
        }
        if !self.timer.is_expired(now) {
            return false;
        }
        self.answered = true;
        true
    }

    /// Move on to the next question.
    ///
    /// Resets the resolved flag and restarts the per-question timer. When
    /// the order is exhausted the session becomes complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` on a complete session and
    /// `SessionError::NotAnswered` while the active question is
    /// unresolved. State is unchanged on error.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !self.answered {
            return Err(SessionError::NotAnswered);
        }

        self.current += 1;
        self.answered = false;
        self.timer.restart(now);
        Ok(())
    }

    /// Build the final record for a complete session.
    ///
    /// Computed once and cached: repeated calls return the same record
    /// without recomputing elapsed time, which is what lets the caller
    /// persist the result exactly once under re-render-driven control
    /// flow.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InProgress` while questions remain.
    pub fn finalize(&mut self, now: DateTime<Utc>) -> Result<&ResultRecord, SessionError> {
        if self.outcome.is_none() {
            if !self.is_complete() {
                return Err(SessionError::InProgress);
            }
            let elapsed_secs =
                u64::try_from((now - self.started_at).num_seconds().max(0)).unwrap_or(0);
            #[allow(clippy::cast_possible_truncation)]
            let total = self.order.len() as u32;
            let record =
                ResultRecord::new(self.participant.clone(), self.score, total, elapsed_secs)?;
            self.outcome = Some(record);
        }
        self.outcome.as_ref().ok_or(SessionError::InProgress)
    }

    /// Read-only view of the session for the presentation layer.
    ///
    /// The view carries everything a renderer needs (prompt, options,
    /// media, progress, remaining-time fraction) and never exposes the
    /// correct answer.
    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        let question = self.order.get(self.current).map(QuestionView::from_question);
        SessionSnapshot {
            participant: self.participant.clone(),
            position: (self.current + 1).min(self.order.len()),
            total: self.order.len(),
            question,
            score: self.score,
            answered: self.answered,
            remaining_fraction: if self.is_complete() {
                0.0
            } else {
                self.remaining_fraction(now)
            },
            is_complete: self.is_complete(),
            is_finished: self.is_finished(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("participant", &self.participant)
            .field("questions_len", &self.order.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answered", &self.answered)
            .field("started_at", &self.started_at)
            .field("finished", &self.outcome.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::time::fixed_now;

    fn build_question(prompt: &str, answer: &str, other: &str) -> Question {
        Question::new(
            prompt,
            vec![answer.to_owned(), other.to_owned()],
            answer,
            None,
            None,
        )
        .unwrap()
    }

    fn build_session(questions: Vec<Question>) -> QuizSession {
        QuizSession::new("Alice", questions, &QuizSettings::default(), fixed_now()).unwrap()
    }

    fn two_question_session() -> QuizSession {
        build_session(vec![
            build_question("Q1?", "a1", "x1"),
            build_question("Q2?", "a2", "x2"),
        ])
    }

    #[test]
    fn new_session_starts_at_zero() {
        let session = two_question_session();
        assert_eq!(session.participant(), "Alice");
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_answered());
        assert!(!session.is_complete());
        assert!(!session.is_finished());
        assert_eq!(session.current_question().unwrap().prompt(), "Q1?");
    }

    #[test]
    fn new_rejects_blank_name_and_empty_order() {
        let questions = vec![build_question("Q?", "a", "b")];
        let err = QuizSession::new("  ", questions, &QuizSettings::default(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyName));

        let err = QuizSession::new("Alice", Vec::new(), &QuizSettings::default(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::Catalog(CatalogError::Empty)));
    }

    #[test]
    fn correct_submission_scores_and_resolves() {
        let mut session = two_question_session();
        let outcome = session.submit_answer("a1").unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.correct_answer, "a1");
        assert_eq!(session.score(), 1);
        assert!(session.is_answered());
    }

    #[test]
    fn wrong_submission_resolves_without_scoring() {
        let mut session = two_question_session();
        let outcome = session.submit_answer("x1").unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_answer, "a1");
        assert_eq!(session.score(), 0);
        assert!(session.is_answered());
    }

    #[test]
    fn resubmission_fails_and_keeps_score() {
        let mut session = two_question_session();
        session.submit_answer("a1").unwrap();
        let err = session.submit_answer("x1").unwrap_err();
        assert!(matches!(err, SessionError::AlreadyAnswered));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn unknown_choice_leaves_state_unchanged() {
        let mut session = two_question_session();
        let err = session.submit_answer("nope").unwrap_err();
        assert!(matches!(err, SessionError::UnknownChoice { .. }));
        assert!(!session.is_answered());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn expiry_resolves_without_scoring_and_blocks_submission() {
        let mut session = two_question_session();
        let late = fixed_now() + Duration::seconds(21);

        assert!(session.expire_timer(late));
        assert!(session.is_answered());
        assert_eq!(session.score(), 0);

        // Expiry is terminal for the question.
        let err = session.submit_answer("a1").unwrap_err();
        assert!(matches!(err, SessionError::AlreadyAnswered));
        assert_eq!(session.score(), 0);

        // And level-triggered: it does not fire twice.
        assert!(!session.expire_timer(late));
    }

    #[test]
    fn expiry_does_not_fire_while_time_remains() {
        let mut session = two_question_session();
        assert!(!session.expire_timer(fixed_now() + Duration::seconds(5)));
        assert!(!session.is_answered());
    }

    #[test]
    fn advance_requires_a_resolved_question() {
        let mut session = two_question_session();
        let err = session.advance(fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::NotAnswered));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_resets_flag_and_timer() {
        let mut session = two_question_session();
        session.submit_answer("a1").unwrap();

        let later = fixed_now() + Duration::seconds(12);
        session.advance(later).unwrap();

        assert_eq!(session.current_index(), 1);
        assert!(!session.is_answered());
        assert_eq!(session.remaining(later), Duration::seconds(20));
        assert_eq!(session.current_question().unwrap().prompt(), "Q2?");
    }

    #[test]
    fn completing_the_order_closes_the_session() {
        let mut session = two_question_session();
        session.submit_answer("a1").unwrap();
        session.advance(fixed_now()).unwrap();
        session.submit_answer("x2").unwrap();
        session.advance(fixed_now()).unwrap();

        assert!(session.is_complete());
        assert!(matches!(
            session.current_question().unwrap_err(),
            SessionError::OutOfQuestions
        ));
        assert!(matches!(
            session.submit_answer("a2").unwrap_err(),
            SessionError::Completed
        ));
        assert!(matches!(
            session.advance(fixed_now()).unwrap_err(),
            SessionError::Completed
        ));
        assert!(!session.expire_timer(fixed_now() + Duration::seconds(100)));
    }

    #[test]
    fn single_question_catalog_runs_a_full_round() {
        let mut session = build_session(vec![build_question("Q?", "a", "b")]);
        session.submit_answer("a").unwrap();
        session.advance(fixed_now()).unwrap();
        assert!(session.is_complete());

        let record = session.finalize(fixed_now()).unwrap();
        assert_eq!(record.score(), 1);
        assert_eq!(record.total(), 1);
        assert!((record.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn finalize_fails_while_in_progress() {
        let mut session = two_question_session();
        let err = session.finalize(fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::InProgress));
        assert!(!session.is_finished());
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut session = two_question_session();
        session.submit_answer("a1").unwrap();
        session.advance(fixed_now()).unwrap();
        session.submit_answer("a2").unwrap();
        session.advance(fixed_now()).unwrap();

        let completed_at = fixed_now() + Duration::seconds(37);
        let first = session.finalize(completed_at).unwrap().clone();
        assert_eq!(first.score(), 2);
        assert_eq!(first.elapsed_secs(), 37);
        assert!(session.is_finished());

        // Later calls return the cached record; elapsed time is frozen.
        let second = session
            .finalize(completed_at + Duration::seconds(500))
            .unwrap();
        assert_eq!(*second, first);
    }

    #[test]
    fn snapshot_reflects_progress_and_hides_the_answer() {
        let mut session = two_question_session();

        let snap = session.snapshot(fixed_now() + Duration::seconds(5));
        assert_eq!(snap.participant, "Alice");
        assert_eq!(snap.position, 1);
        assert_eq!(snap.total, 2);
        assert!(!snap.answered);
        assert!((snap.remaining_fraction - 0.75).abs() < 1e-9);
        let view = snap.question.unwrap();
        assert_eq!(view.prompt, "Q1?");
        assert_eq!(view.options, vec!["a1".to_owned(), "x1".to_owned()]);

        session.submit_answer("a1").unwrap();
        session.advance(fixed_now()).unwrap();
        session.submit_answer("a2").unwrap();
        session.advance(fixed_now()).unwrap();

        let snap = session.snapshot(fixed_now());
        assert!(snap.is_complete);
        assert!(snap.question.is_none());
        assert_eq!(snap.position, 2);
        assert_eq!(snap.score, 2);
        assert!((snap.remaining_fraction).abs() < f64::EPSILON);
    }
}
