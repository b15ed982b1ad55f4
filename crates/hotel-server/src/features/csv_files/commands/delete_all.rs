use crate::selections::DatasetSelections;
use crate::source::DatasetSource;
use crate::storage::FileStorage;
use hotel_common::HotelError;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct DeleteAllCsvCommand;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteAllCsvResponse {
    pub count: usize,
    pub deleted: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAllCsvError {
    #[error(transparent)]
    Storage(#[from] HotelError),
}

/// Deleting when nothing was ever uploaded succeeds with a count of zero
#[tracing::instrument(skip(storage, source, selections))]
pub async fn handle(
    storage: &FileStorage,
    source: &dyn DatasetSource,
    selections: &DatasetSelections,
    _command: DeleteAllCsvCommand,
) -> Result<DeleteAllCsvResponse, DeleteAllCsvError> {
    let deleted = storage.delete_all().await?;

    for name in &deleted {
        source.forget(name).await?;
    }
    if !deleted.is_empty() {
        selections.forget_all().await;
    }

    Ok(DeleteAllCsvResponse {
        count: deleted.len(),
        deleted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::StaticSource;
    use crate::storage::config::StorageConfig;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_delete_all() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path().join("uploads")));
        let selections = DatasetSelections::new();
        let source = StaticSource::unavailable();

        let empty = handle(&storage, &source, &selections, DeleteAllCsvCommand).await.unwrap();
        assert_eq!(empty.count, 0);

        storage.save("a.csv", b"1").await.unwrap();
        storage.save("b.csv", b"2").await.unwrap();
        let user = Uuid::new_v4();
        selections.set(user, "b.csv").await;

        let response = handle(&storage, &source, &selections, DeleteAllCsvCommand).await.unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.deleted, vec!["a.csv", "b.csv"]);
        assert_eq!(selections.get(user).await, None);
    }
}
