use crate::selections::DatasetSelections;
use crate::source::DatasetSource;
use crate::storage::FileStorage;
use hotel_common::HotelError;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct DeleteCsvCommand {
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCsvResponse {
    pub name: String,
    /// Callers whose selection pointed at the deleted file
    pub deselected: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteCsvError {
    #[error("{0}")]
    InvalidFileName(String),
    #[error("File '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Storage(HotelError),
}

#[tracing::instrument(skip(storage, source, selections))]
pub async fn handle(
    storage: &FileStorage,
    source: &dyn DatasetSource,
    selections: &DatasetSelections,
    command: DeleteCsvCommand,
) -> Result<DeleteCsvResponse, DeleteCsvError> {
    let name = storage.delete(&command.filename).await.map_err(|e| match e {
        HotelError::NotFound(_) => DeleteCsvError::NotFound(command.filename.clone()),
        HotelError::InvalidArgument(message) => DeleteCsvError::InvalidFileName(message),
        other => DeleteCsvError::Storage(other),
    })?;

    source.forget(&name).await.map_err(DeleteCsvError::Storage)?;
    let deselected = selections.forget_dataset(&name).await;

    Ok(DeleteCsvResponse { name, deselected })
}
