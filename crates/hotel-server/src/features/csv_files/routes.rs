//! CSV file management routes
//!
//! # Route Structure
//!
//! - `POST /csv_files/upload` - upload a dataset (multipart field `csv_file`)
//! - `GET /csv_files/list` - stored files
//! - `DELETE /csv_files/delete/all` - delete every stored file
//! - `DELETE /csv_files/delete/:filename` - delete one file
//! - `POST /csv_files/set/:filename` - select a file for `/bookings`
//! - `GET /csv_files/get_current` - the caller's selection

use crate::api::response::ApiResponse;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::features::FeatureState;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

use super::commands::{
    DeleteAllCsvCommand, DeleteAllCsvError, DeleteCsvCommand, DeleteCsvError,
    SetCurrentFileCommand, SetCurrentFileError, UploadCsvCommand, UploadCsvError, UPLOAD_FIELD,
};
use super::queries::{GetCurrentFileQuery, ListCsvFilesError, ListCsvFilesQuery};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn csv_files_routes() -> Router<FeatureState> {
    Router::new()
        .route("/upload", post(upload_csv))
        .route("/list", get(list_csv_files))
        .route("/delete/all", delete(delete_all_csv_files))
        .route("/delete/:filename", delete(delete_csv_file))
        .route("/set/:filename", post(set_current_file))
        .route("/get_current", get(get_current_file))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Upload a dataset
///
/// # Response
///
/// - `201 Created` - file parsed and stored
/// - `400 Bad Request` - missing field, bad file name, or rows that do not
///   match the booking schema
/// - `413 Payload Too Large` - file over the upload limit
#[tracing::instrument(skip(state, multipart))]
async fn upload_csv(
    State(state): State<FeatureState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, CsvFilesApiError> {
    let mut multipart = multipart?;

    let mut command = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or(UploadCsvError::MissingFile)?;
        let content = field.bytes().await?;
        command = Some(UploadCsvCommand {
            filename,
            content,
            max_bytes: state.max_upload_bytes,
        });
        break;
    }
    let command = command.ok_or(UploadCsvError::MissingFile)?;

    let response =
        super::commands::upload::handle(&state.storage, state.source.as_ref(), command).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state))]
async fn delete_csv_file(
    State(state): State<FeatureState>,
    Path(filename): Path<String>,
) -> Result<Response, CsvFilesApiError> {
    let response = super::commands::delete::handle(
        &state.storage,
        state.source.as_ref(),
        &state.selections,
        DeleteCsvCommand { filename },
    )
    .await?;

    tracing::info!(name = %response.name, "File deleted via API");
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state))]
async fn delete_all_csv_files(
    State(state): State<FeatureState>,
) -> Result<Response, CsvFilesApiError> {
    let response = super::commands::delete_all::handle(
        &state.storage,
        state.source.as_ref(),
        &state.selections,
        DeleteAllCsvCommand,
    )
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Select a stored file as the caller's dataset
#[tracing::instrument(skip(state), fields(user = %user))]
async fn set_current_file(
    State(state): State<FeatureState>,
    user: CurrentUser,
    Path(filename): Path<String>,
) -> Result<Response, CsvFilesApiError> {
    let response = super::commands::set_current::handle(
        &state.storage,
        &state.selections,
        SetCurrentFileCommand {
            user: user.id(),
            filename,
        },
    )
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `404 Not Found` when nothing was ever uploaded
#[tracing::instrument(skip(state))]
async fn list_csv_files(State(state): State<FeatureState>) -> Result<Response, CsvFilesApiError> {
    let response = super::queries::list::handle(&state.storage, ListCsvFilesQuery).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state), fields(user = %user))]
async fn get_current_file(State(state): State<FeatureState>, user: CurrentUser) -> Response {
    let response = super::queries::get_current::handle(
        &state.selections,
        GetCurrentFileQuery { user: user.id() },
    )
    .await;
    (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum CsvFilesApiError {
    Multipart(String, StatusCode),
    Upload(UploadCsvError),
    Delete(DeleteCsvError),
    DeleteAll(DeleteAllCsvError),
    Set(SetCurrentFileError),
    List(ListCsvFilesError),
}

impl From<MultipartRejection> for CsvFilesApiError {
    fn from(err: MultipartRejection) -> Self {
        Self::Multipart(err.body_text(), err.status())
    }
}

impl From<MultipartError> for CsvFilesApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err.body_text(), err.status())
    }
}

impl From<UploadCsvError> for CsvFilesApiError {
    fn from(err: UploadCsvError) -> Self {
        Self::Upload(err)
    }
}

impl From<DeleteCsvError> for CsvFilesApiError {
    fn from(err: DeleteCsvError) -> Self {
        Self::Delete(err)
    }
}

impl From<DeleteAllCsvError> for CsvFilesApiError {
    fn from(err: DeleteAllCsvError) -> Self {
        Self::DeleteAll(err)
    }
}

impl From<SetCurrentFileError> for CsvFilesApiError {
    fn from(err: SetCurrentFileError) -> Self {
        Self::Set(err)
    }
}

impl From<ListCsvFilesError> for CsvFilesApiError {
    fn from(err: ListCsvFilesError) -> Self {
        Self::List(err)
    }
}

impl From<CsvFilesApiError> for AppError {
    fn from(err: CsvFilesApiError) -> Self {
        match err {
            CsvFilesApiError::Multipart(message, status)
                if status == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                AppError::PayloadTooLarge(message)
            },
            CsvFilesApiError::Multipart(message, _) => AppError::Validation(message),

            CsvFilesApiError::Upload(e @ UploadCsvError::TooLarge { .. }) => {
                AppError::PayloadTooLarge(e.to_string())
            },
            CsvFilesApiError::Upload(e @ UploadCsvError::InvalidData(_)) => {
                AppError::InvalidData(e.to_string())
            },
            CsvFilesApiError::Upload(UploadCsvError::Storage(e)) => AppError::from(e),
            CsvFilesApiError::Upload(e) => AppError::Validation(e.to_string()),

            CsvFilesApiError::Delete(e @ DeleteCsvError::NotFound(_)) => {
                AppError::NotFound(e.to_string())
            },
            CsvFilesApiError::Delete(DeleteCsvError::Storage(e)) => AppError::from(e),
            CsvFilesApiError::Delete(e) => AppError::Validation(e.to_string()),

            CsvFilesApiError::DeleteAll(DeleteAllCsvError::Storage(e)) => AppError::from(e),

            CsvFilesApiError::Set(e @ SetCurrentFileError::NotFound(_)) => {
                AppError::NotFound(e.to_string())
            },
            CsvFilesApiError::Set(SetCurrentFileError::Storage(e)) => AppError::from(e),
            CsvFilesApiError::Set(e) => AppError::Validation(e.to_string()),

            CsvFilesApiError::List(e @ ListCsvFilesError::NoUploads) => {
                AppError::NotFound(e.to_string())
            },
            CsvFilesApiError::List(ListCsvFilesError::Storage(e)) => AppError::from(e),
        }
    }
}

impl IntoResponse for CsvFilesApiError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_common::HotelError;

    #[test]
    fn test_error_statuses() {
        let status = |err: CsvFilesApiError| AppError::from(err).status();

        assert_eq!(
            status(UploadCsvError::TooLarge { limit: 1 }.into()),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status(UploadCsvError::InvalidData(HotelError::SchemaMismatch("x".into())).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(UploadCsvError::MissingFile.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(DeleteCsvError::NotFound("a.csv".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(ListCsvFilesError::NoUploads.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status(SetCurrentFileError::Storage(HotelError::Io(std::io::Error::other("disk"))).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
