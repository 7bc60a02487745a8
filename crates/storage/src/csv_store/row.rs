use serde::{Deserialize, Serialize};

use trivia_core::model::ResultRecord;

use crate::repository::StorageError;

/// Wire shape of one leaderboard row.
///
/// Column names and order match the persisted table exactly; the
/// percentage travels as its two-decimal display form (`75.00`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ResultRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Score")]
    pub score: u32,
    #[serde(rename = "Total")]
    pub total: u32,
    #[serde(rename = "Percentage")]
    pub percentage: String,
    #[serde(rename = "Time (s)")]
    pub elapsed_secs: u64,
}

impl ResultRow {
    pub(crate) fn from_record(record: &ResultRecord) -> Self {
        Self {
            name: record.name().to_owned(),
            score: record.score(),
            total: record.total(),
            percentage: format!("{:.2}", record.percentage()),
            elapsed_secs: record.elapsed_secs(),
        }
    }

    /// Convert the row back into a domain record, validating consistency.
    pub(crate) fn into_record(self) -> Result<ResultRecord, StorageError> {
        let percentage: f64 = self
            .percentage
            .trim()
            .parse()
            .map_err(|_| StorageError::Corrupt(format!("bad percentage {:?}", self.percentage)))?;

        ResultRecord::from_persisted(self.name, self.score, self.total, percentage, self.elapsed_secs)
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }
}
