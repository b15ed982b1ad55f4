use crate::source::file::parse_csv;
use crate::source::DatasetSource;
use crate::storage::{sanitize_filename, FileStorage};
use axum::body::Bytes;
use hotel_common::HotelError;
use serde::Serialize;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "csv_file";

#[derive(Debug, Clone)]
pub struct UploadCsvCommand {
    pub filename: String,
    pub content: Bytes,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadCsvResponse {
    pub name: String,
    pub size: u64,
    pub sha256: String,
    pub records: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadCsvError {
    #[error("Multipart field 'csv_file' with a file is required")]
    MissingFile,
    #[error("{0}")]
    InvalidFileName(String),
    #[error("Uploaded file is empty")]
    EmptyFile,
    #[error("File exceeds the upload limit of {limit} bytes")]
    TooLarge { limit: usize },
    #[error("File is not a valid booking dataset: {0}")]
    InvalidData(HotelError),
    #[error(transparent)]
    Storage(HotelError),
}

impl UploadCsvCommand {
    /// Returns the sanitized file name
    pub fn validate(&self) -> Result<String, UploadCsvError> {
        let name = sanitize_filename(&self.filename)
            .map_err(|e| UploadCsvError::InvalidFileName(e.to_string()))?;
        if self.content.is_empty() {
            return Err(UploadCsvError::EmptyFile);
        }
        if self.content.len() > self.max_bytes {
            return Err(UploadCsvError::TooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(name)
    }
}

/// Parse the whole upload, hand it to the source, then store it
///
/// Nothing is written unless every row parses and the source accepts the
/// dataset. If the file cannot be stored afterwards the source forgets it
/// again.
#[tracing::instrument(skip(storage, source, command), fields(filename = %command.filename, size = command.content.len()))]
pub async fn handle(
    storage: &FileStorage,
    source: &dyn DatasetSource,
    command: UploadCsvCommand,
) -> Result<UploadCsvResponse, UploadCsvError> {
    let name = command.validate()?;

    let content = command.content.clone();
    let dataset = tokio::task::spawn_blocking(move || parse_csv(content.as_ref()))
        .await
        .map_err(|e| UploadCsvError::Storage(HotelError::Io(std::io::Error::other(e))))?
        .map_err(UploadCsvError::InvalidData)?;

    source
        .ingest(&name, &dataset)
        .await
        .map_err(UploadCsvError::Storage)?;

    let stored = match storage.save(&name, &command.content).await {
        Ok(stored) => stored,
        Err(e) => {
            if let Err(forget_err) = source.forget(&name).await {
                tracing::warn!(name = %name, error = %forget_err, "Failed to roll back ingested dataset");
            }
            return Err(UploadCsvError::Storage(e));
        },
    };

    tracing::info!(
        name = %stored.name,
        records = dataset.len(),
        backend = source.backend(),
        "Dataset uploaded"
    );

    Ok(UploadCsvResponse {
        name: stored.name,
        size: stored.size,
        sha256: stored.sha256,
        records: dataset.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::StaticSource;
    use crate::storage::config::StorageConfig;
    use hotel_common::types::fixtures::{csv_document, BookingBuilder};
    use tempfile::TempDir;

    fn command(filename: &str, content: impl Into<Bytes>) -> UploadCsvCommand {
        UploadCsvCommand {
            filename: filename.to_string(),
            content: content.into(),
            max_bytes: 1024 * 1024,
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(command("a.csv", "x").validate().unwrap(), "a.csv");
        assert!(matches!(command("..", "x").validate(), Err(UploadCsvError::InvalidFileName(_))));
        assert!(matches!(command("a.csv", "").validate(), Err(UploadCsvError::EmptyFile)));

        let mut big = command("a.csv", "12345");
        big.max_bytes = 4;
        assert!(matches!(big.validate(), Err(UploadCsvError::TooLarge { limit: 4 })));
    }

    #[tokio::test]
    async fn test_upload_stores_valid_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path()));
        let document = csv_document(&[BookingBuilder::new().build(), BookingBuilder::new().build()]);

        let response = handle(&storage, &StaticSource::unavailable(), command("hotels.csv", document))
            .await
            .unwrap();

        assert_eq!(response.name, "hotels.csv");
        assert_eq!(response.records, 2);
        assert_eq!(response.sha256.len(), 64);
        assert!(storage.exists("hotels.csv").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_header_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path()));

        let err = handle(
            &storage,
            &StaticSource::unavailable(),
            command("bad.csv", "hotel,adr\nCity Hotel,1\n"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UploadCsvError::InvalidData(HotelError::SchemaMismatch(_))));
        assert!(!storage.exists("bad.csv").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejected_ingest_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path()));
        let document = csv_document(&[BookingBuilder::new().build()]);

        let err = handle(&storage, &StaticSource::rejecting_ingest(), command("hotels.csv", document))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadCsvError::Storage(HotelError::Database(_))));
        assert!(!storage.exists("hotels.csv").await.unwrap());
        let listed = storage.list().await.unwrap().unwrap_or_default();
        assert!(listed.iter().all(|entry| entry.name != "hotels.csv"));
    }

    #[tokio::test]
    async fn test_failed_save_forgets_ingested_dataset() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let storage = FileStorage::new(StorageConfig::new(&blocker));
        let source = StaticSource::unavailable();
        let document = csv_document(&[BookingBuilder::new().build()]);

        let err = handle(&storage, &source, command("hotels.csv", document))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadCsvError::Storage(_)));
        assert_eq!(source.forgotten(), vec!["hotels.csv".to_string()]);
    }
}
