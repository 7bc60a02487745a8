use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};

use trivia_core::model::ResultRecord;

use crate::repository::{ResultRepository, StorageError};

mod row;

use row::ResultRow;

/// Leaderboard store backed by a single CSV file.
///
/// Writes use read-modify-write semantics: the whole table is read,
/// the new row appended, and the table written back. That is fine for the
/// low write volume here; it offers no concurrent-writer safety, so callers
/// needing that must serialize `append` themselves.
#[derive(Debug, Clone)]
pub struct CsvResultStore {
    path: PathBuf,
}

impl CsvResultStore {
    /// Use the CSV file at `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ResultRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for row in reader.deserialize::<ResultRow>() {
            let row = row.map_err(|e| StorageError::Corrupt(e.to_string()))?;
            records.push(row.into_record()?);
        }
        Ok(records)
    }

    fn write_all(&self, records: &[ResultRecord]) -> Result<(), StorageError> {
        let mut writer =
            csv::Writer::from_path(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        for record in records {
            writer
                .serialize(ResultRow::from_record(record))
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        writer.flush().map_err(|e| StorageError::Io(e.to_string()))
    }
}

#[async_trait]
impl ResultRepository for CsvResultStore {
    async fn append(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut records = self.read_all()?;
        if records.is_empty() && !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "creating leaderboard store");
        }
        records.push(record.clone());
        self.write_all(&records)?;
        tracing::info!(
            participant = record.name(),
            score = record.score(),
            total = record.total(),
            "result appended to leaderboard store"
        );
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<ResultRecord>, StorageError> {
        self.read_all()
    }
}
