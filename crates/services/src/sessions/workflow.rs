use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;

use storage::repository::ResultRepository;
use trivia_core::Clock;
use trivia_core::model::{Catalog, QuizSettings, ResultRecord};

use crate::error::SessionError;
use super::service::{AnswerOutcome, QuizSession};
use super::snapshot::SessionSnapshot;

/// Final outcome of a quiz run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub record: ResultRecord,
    pub passed: bool,
    /// False when `finish` was called again on an already-finished session.
    pub newly_persisted: bool,
}

/// Orchestrates quiz sessions over a shared leaderboard store.
///
/// Owns the clock, the settings, the question catalog, and the result
/// repository; the presentation layer holds the `QuizSession` value and
/// drives it through this service's intents. Restart is modeled by
/// discarding the session and starting a fresh one.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    catalog: Catalog,
    results: Arc<dyn ResultRepository + Send + Sync>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: QuizSettings,
        catalog: Catalog,
        results: Arc<dyn ResultRepository + Send + Sync>,
    ) -> Self {
        Self {
            clock,
            settings,
            catalog,
            results,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Start a fresh session: a uniformly random permutation of the whole
    /// catalog, score and progress reset.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyName` for a blank participant name.
    pub fn start_session(&self, participant: &str) -> Result<QuizSession, SessionError> {
        let mut order = self.catalog.questions().to_vec();
        order.shuffle(&mut rng());

        let session = QuizSession::new(participant, order, &self.settings, self.clock.now())?;
        tracing::info!(
            session = %session.id(),
            participant = session.participant(),
            questions = session.total_questions(),
            "quiz session started"
        );
        Ok(session)
    }

    /// One render pass: apply timer expiry if due, then snapshot.
    ///
    /// Correctness does not depend on polling frequency; a late poll only
    /// delays the time's-up transition, never misses it.
    pub fn poll(&self, session: &mut QuizSession) -> SessionSnapshot {
        let now = self.clock.now();
        if session.expire_timer(now) {
            tracing::debug!(
                session = %session.id(),
                question = session.current_index(),
                "question timed out"
            );
        }
        session.snapshot(now)
    }

    /// Submit the participant's choice for the active question.
    ///
    /// # Errors
    ///
    /// Propagates the session's state-machine errors.
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        choice: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        session.submit_answer(choice)
    }

    /// Move the session to its next question.
    ///
    /// # Errors
    ///
    /// Propagates the session's state-machine errors.
    pub fn advance(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        session.advance(self.clock.now())
    }

    /// Finalize a complete session and persist its record.
    ///
    /// The record is appended to the store exactly once per session; calling
    /// `finish` again (e.g. from a repeated render of the results screen)
    /// returns the same outcome with `newly_persisted` set to false.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InProgress` while questions remain and
    /// `SessionError::Storage` when the append fails.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<QuizOutcome, SessionError> {
        let newly_persisted = !session.is_finished();
        let record = session.finalize(self.clock.now())?.clone();

        if newly_persisted {
            self.results.append(&record).await?;
            tracing::info!(
                session = %session.id(),
                participant = record.name(),
                score = record.score(),
                total = record.total(),
                "quiz finished and result persisted"
            );
        }

        let passed = record.is_pass(self.settings.pass_mark_pct());
        Ok(QuizOutcome {
            record,
            passed,
            newly_persisted,
        })
    }
}
