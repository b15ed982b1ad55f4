//! Dataset sources
//!
//! A [`DatasetSource`] hands the aggregation engine a complete [`Dataset`].
//! Which dataset to load is always passed in explicitly as a [`DatasetRef`];
//! sources keep no notion of a "current" dataset.
//!
//! Two backends exist:
//!
//! - [`CsvFileSource`]: CSV files in the upload directory, plus an optional
//!   demo file used when the caller has not selected anything
//! - [`PgTableSource`]: rows of the `bookings` table, partitioned by dataset name

pub mod file;
pub mod manifest;
pub mod postgres;

use crate::analytics::Dataset;
use async_trait::async_trait;
use hotel_common::Result;
use serde::Serialize;
use std::fmt;

pub use file::CsvFileSource;
pub use postgres::PgTableSource;

/// Which dataset to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum DatasetRef {
    /// A dataset stored under this name
    Named(String),
    /// Whatever the backend serves when nothing was selected
    Default,
}

impl DatasetRef {
    pub fn from_selection(selection: Option<String>) -> Self {
        selection.map_or(DatasetRef::Default, DatasetRef::Named)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetRef::Named(name) => f.write_str(name),
            DatasetRef::Default => f.write_str("<default>"),
        }
    }
}

/// Supplies whole datasets to the aggregation engine
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load a complete dataset
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` when the dataset does not exist
    /// - `SchemaMismatch` when its columns differ from the manifest
    async fn load(&self, dataset: &DatasetRef) -> Result<Dataset>;

    /// Make an uploaded dataset available under `name`
    ///
    /// File-backed sources read uploads in place and need nothing here.
    async fn ingest(&self, _name: &str, _dataset: &Dataset) -> Result<()> {
        Ok(())
    }

    /// Drop a dataset previously made available with [`DatasetSource::ingest`]
    async fn forget(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
