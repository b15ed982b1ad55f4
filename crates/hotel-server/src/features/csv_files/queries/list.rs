use crate::storage::{FileEntry, FileStorage};
use hotel_common::HotelError;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListCsvFilesQuery;

#[derive(Debug, Clone, Serialize)]
pub struct ListCsvFilesResponse {
    pub count: usize,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListCsvFilesError {
    #[error("No files have been uploaded yet")]
    NoUploads,
    #[error(transparent)]
    Storage(#[from] HotelError),
}

#[tracing::instrument(skip(storage))]
pub async fn handle(
    storage: &FileStorage,
    _query: ListCsvFilesQuery,
) -> Result<ListCsvFilesResponse, ListCsvFilesError> {
    let files = storage.list().await?.ok_or(ListCsvFilesError::NoUploads)?;
    Ok(ListCsvFilesResponse {
        count: files.len(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::StorageConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_nothing_uploaded() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path().join("never-created")));
        assert!(matches!(
            handle(&storage, ListCsvFilesQuery).await,
            Err(ListCsvFilesError::NoUploads)
        ));
    }

    #[tokio::test]
    async fn test_lists_uploads() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path().join("uploads")));
        storage.save("b.csv", b"bb").await.unwrap();
        storage.save("a.csv", b"a").await.unwrap();

        let response = handle(&storage, ListCsvFilesQuery).await.unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.files[0].name, "a.csv");
        assert_eq!(response.files[1].size, 2);
    }
}
