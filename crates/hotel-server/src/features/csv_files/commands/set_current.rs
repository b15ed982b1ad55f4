use crate::selections::DatasetSelections;
use crate::storage::{sanitize_filename, FileStorage};
use hotel_common::HotelError;
use serde::Serialize;
use uuid::Uuid;

/// Select an uploaded file as the caller's dataset
#[derive(Debug, Clone)]
pub struct SetCurrentFileCommand {
    pub user: Uuid,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetCurrentFileResponse {
    pub file: String,
    pub previous: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SetCurrentFileError {
    #[error("{0}")]
    InvalidFileName(String),
    #[error("File '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] HotelError),
}

impl SetCurrentFileCommand {
    pub fn validate(&self) -> Result<String, SetCurrentFileError> {
        sanitize_filename(&self.filename)
            .map_err(|e| SetCurrentFileError::InvalidFileName(e.to_string()))
    }
}

#[tracing::instrument(skip(storage, selections))]
pub async fn handle(
    storage: &FileStorage,
    selections: &DatasetSelections,
    command: SetCurrentFileCommand,
) -> Result<SetCurrentFileResponse, SetCurrentFileError> {
    let name = command.validate()?;

    if !storage.exists(&name).await? {
        return Err(SetCurrentFileError::NotFound(name));
    }

    let previous = selections.set(command.user, name.clone()).await;
    tracing::info!(user = %command.user, file = %name, "Dataset selected for analysis");

    Ok(SetCurrentFileResponse {
        file: name,
        previous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::StorageConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_existing_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path()));
        let selections = DatasetSelections::new();
        let user = Uuid::new_v4();
        storage.save("a.csv", b"x").await.unwrap();
        storage.save("b.csv", b"x").await.unwrap();

        let first = handle(
            &storage,
            &selections,
            SetCurrentFileCommand {
                user,
                filename: "a.csv".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(first.previous, None);

        let second = handle(
            &storage,
            &selections,
            SetCurrentFileCommand {
                user,
                filename: "b.csv".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(second.previous.as_deref(), Some("a.csv"));
        assert_eq!(selections.get(user).await.as_deref(), Some("b.csv"));
    }

    #[tokio::test]
    async fn test_set_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path()));

        let err = handle(
            &storage,
            &DatasetSelections::new(),
            SetCurrentFileCommand {
                user: Uuid::new_v4(),
                filename: "nope.csv".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SetCurrentFileError::NotFound(_)));
    }
}
