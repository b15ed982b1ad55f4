pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    DeleteAllCsvCommand, DeleteAllCsvError, DeleteAllCsvResponse, DeleteCsvCommand,
    DeleteCsvError, DeleteCsvResponse, SetCurrentFileCommand, SetCurrentFileError,
    SetCurrentFileResponse, UploadCsvCommand, UploadCsvError, UploadCsvResponse,
};
pub use queries::{
    GetCurrentFileQuery, GetCurrentFileResponse, ListCsvFilesError, ListCsvFilesQuery,
    ListCsvFilesResponse,
};
pub use routes::csv_files_routes;
