#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use trivia_core::Clock;

pub use error::SessionError;
pub use sessions::{
    AnswerOutcome, LeaderboardService, QuestionView, QuizLoopService, QuizOutcome, QuizSession,
    SessionSnapshot,
};
