//! CSV-backed dataset source

use super::manifest::validate_header;
use super::{DatasetRef, DatasetSource};
use crate::analytics::Dataset;
use crate::storage::FileStorage;
use async_trait::async_trait;
use hotel_common::{BookingRecord, HotelError, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Parse a complete CSV document into a dataset
///
/// The header is checked against the manifest before any row is read.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    validate_header(reader.headers()?.iter())?;

    let records = reader
        .deserialize::<BookingRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Dataset::new(records))
}

fn read_csv_file(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            HotelError::SourceUnavailable(format!("{} does not exist", path.display()))
        },
        _ => HotelError::Io(e),
    })?;
    parse_csv(std::io::BufReader::new(file))
}

/// Loads uploaded CSV files from [`FileStorage`]
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    storage: FileStorage,
    demo: Option<PathBuf>,
}

impl CsvFileSource {
    pub fn new(storage: FileStorage, demo: Option<PathBuf>) -> Self {
        Self { storage, demo }
    }

    fn resolve(&self, dataset: &DatasetRef) -> Result<PathBuf> {
        match dataset {
            DatasetRef::Named(name) => self.storage.path_for(name),
            DatasetRef::Default => self.demo.clone().ok_or_else(|| {
                HotelError::SourceUnavailable(
                    "no dataset selected; upload a CSV file and select it".to_string(),
                )
            }),
        }
    }
}

#[async_trait]
impl DatasetSource for CsvFileSource {
    #[instrument(skip(self), fields(dataset = %dataset))]
    async fn load(&self, dataset: &DatasetRef) -> Result<Dataset> {
        let path = self.resolve(dataset)?;
        debug!("Reading dataset from {}", path.display());

        let loaded = tokio::task::spawn_blocking(move || read_csv_file(&path))
            .await
            .map_err(|e| HotelError::Io(std::io::Error::other(e)))??;

        info!(records = loaded.len(), "Dataset loaded");
        Ok(loaded)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::StorageConfig;
    use hotel_common::types::fixtures::{csv_document, BookingBuilder};
    use tempfile::TempDir;

    fn source(dir: &TempDir, demo: Option<PathBuf>) -> CsvFileSource {
        let storage = FileStorage::new(StorageConfig::new(dir.path()));
        CsvFileSource::new(storage, demo)
    }

    #[test]
    fn test_parse_csv() {
        let records = vec![
            BookingBuilder::new().name("First").build(),
            BookingBuilder::new().resort().name("Second").build(),
        ];
        let dataset = parse_csv(csv_document(&records).as_bytes()).unwrap();
        assert_eq!(dataset.records(), records.as_slice());
    }

    #[test]
    fn test_parse_csv_rejects_wrong_header() {
        let err = parse_csv("hotel,adr\nCity Hotel,10\n".as_bytes()).unwrap_err();
        assert!(matches!(err, HotelError::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn test_load_named_file() {
        let dir = TempDir::new().unwrap();
        let document = csv_document(&[BookingBuilder::new().build()]);
        std::fs::write(dir.path().join("hotels.csv"), document).unwrap();

        let dataset = source(&dir, None)
            .load(&DatasetRef::Named("hotels.csv".into()))
            .await
            .unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = source(&dir, None)
            .load(&DatasetRef::Named("nope.csv".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, HotelError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_default_without_demo_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = source(&dir, None).load(&DatasetRef::Default).await.unwrap_err();
        assert!(matches!(err, HotelError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_default_uses_demo_file() {
        let dir = TempDir::new().unwrap();
        let demo = dir.path().join("demo.csv");
        let records: Vec<_> = (0..3).map(|_| BookingBuilder::new().build()).collect();
        std::fs::write(&demo, csv_document(&records)).unwrap();

        let dataset = source(&dir, Some(demo)).load(&DatasetRef::Default).await.unwrap();
        assert_eq!(dataset.len(), 3);
    }
}
