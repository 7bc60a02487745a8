mod queries;
mod service;
mod snapshot;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use queries::LeaderboardService;
pub use service::{AnswerOutcome, QuizSession};
pub use snapshot::{QuestionView, SessionSnapshot};
pub use workflow::{QuizLoopService, QuizOutcome};
