pub mod delete;
pub mod delete_all;
pub mod set_current;
pub mod upload;

pub use delete::{DeleteCsvCommand, DeleteCsvError, DeleteCsvResponse};
pub use delete_all::{DeleteAllCsvCommand, DeleteAllCsvError, DeleteAllCsvResponse};
pub use set_current::{SetCurrentFileCommand, SetCurrentFileError, SetCurrentFileResponse};
pub use upload::{UploadCsvCommand, UploadCsvError, UploadCsvResponse, UPLOAD_FIELD};
