use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("pass mark must be in (0, 100]")]
    InvalidPassMark,
}

/// Tunables for a quiz run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    time_limit_secs: u32,
    pass_mark_pct: f64,
}

impl QuizSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` for a zero time limit or a pass mark outside
    /// `(0, 100]`.
    pub fn new(time_limit_secs: u32, pass_mark_pct: f64) -> Result<Self, SettingsError> {
        if time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if !pass_mark_pct.is_finite() || pass_mark_pct <= 0.0 || pass_mark_pct > 100.0 {
            return Err(SettingsError::InvalidPassMark);
        }
        Ok(Self {
            time_limit_secs,
            pass_mark_pct,
        })
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::seconds(i64::from(self.time_limit_secs))
    }

    #[must_use]
    pub fn pass_mark_pct(&self) -> f64 {
        self.pass_mark_pct
    }
}

impl Default for QuizSettings {
    /// 20 seconds per question, 50% to pass.
    fn default() -> Self {
        Self {
            time_limit_secs: 20,
            pass_mark_pct: 50.0,
        }
    }
}
