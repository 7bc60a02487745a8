#![forbid(unsafe_code)]

pub mod csv_store;
pub mod repository;

pub use csv_store::CsvResultStore;
pub use repository::{InMemoryRepository, ResultRepository, StorageError};
