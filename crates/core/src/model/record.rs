use thiserror::Error;

/// Stored percentages are rendered with two decimals, so rehydrated values
/// may differ from the recomputed ratio by at most half a display unit.
const PERCENTAGE_TOLERANCE: f64 = 0.5;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("participant name cannot be empty")]
    EmptyName,

    #[error("a result needs at least one question")]
    ZeroTotal,

    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("stored percentage {stored} does not match score/total ({computed})")]
    PercentageMismatch { stored: f64, computed: f64 },
}

/// One completed quiz attempt, as appended to the leaderboard store.
///
/// Records are created once at session completion and never mutated or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    name: String,
    score: u32,
    total: u32,
    percentage: f64,
    elapsed_secs: u64,
}

impl ResultRecord {
    /// Builds a record for a finished session, computing the percentage.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` for an empty name, a zero total, or a score
    /// larger than the total.
    pub fn new(
        name: impl Into<String>,
        score: u32,
        total: u32,
        elapsed_secs: u64,
    ) -> Result<Self, RecordError> {
        let name = name.into();
        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if total == 0 {
            return Err(RecordError::ZeroTotal);
        }
        if score > total {
            return Err(RecordError::ScoreExceedsTotal { score, total });
        }

        let percentage = f64::from(score) / f64::from(total) * 100.0;
        Ok(Self {
            name,
            score,
            total,
            percentage,
            elapsed_secs,
        })
    }

    /// Rehydrates a record from persisted storage.
    ///
    /// The stored percentage is kept as-is but checked against the
    /// recomputed ratio; a disagreement beyond display rounding means the
    /// row was tampered with or corrupted.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` for the same invalid shapes as `new`, plus
    /// `RecordError::PercentageMismatch` on an inconsistent percentage.
    pub fn from_persisted(
        name: impl Into<String>,
        score: u32,
        total: u32,
        percentage: f64,
        elapsed_secs: u64,
    ) -> Result<Self, RecordError> {
        let record = Self::new(name, score, total, elapsed_secs)?;
        let computed = record.percentage;
        if !percentage.is_finite() || (percentage - computed).abs() > PERCENTAGE_TOLERANCE {
            return Err(RecordError::PercentageMismatch {
                stored: percentage,
                computed,
            });
        }
        Ok(Self {
            percentage,
            ..record
        })
    }

    // Accessors
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Whether this attempt clears the given pass mark (in percent).
    #[must_use]
    pub fn is_pass(&self, pass_mark_pct: f64) -> bool {
        self.percentage >= pass_mark_pct
    }
}
