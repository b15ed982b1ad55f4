use crate::selections::DatasetSelections;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GetCurrentFileQuery {
    pub user: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetCurrentFileResponse {
    /// `null` until the caller selects a file
    pub file: Option<String>,
}

#[tracing::instrument(skip(selections))]
pub async fn handle(selections: &DatasetSelections, query: GetCurrentFileQuery) -> GetCurrentFileResponse {
    GetCurrentFileResponse {
        file: selections.get(query.user).await,
    }
}
