pub mod get_current;
pub mod list;

pub use get_current::{GetCurrentFileQuery, GetCurrentFileResponse};
pub use list::{ListCsvFilesError, ListCsvFilesQuery, ListCsvFilesResponse};
