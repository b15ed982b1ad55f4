//! Feature modules implementing the hotel analytics API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes, in the CQRS style: commands change stored datasets or selections,
//! queries only read.
//!
//! # Features
//!
//! - **bookings**: record listings and the aggregation menu over the caller's
//!   selected dataset
//! - **csv_files**: uploading, listing, deleting and selecting dataset files
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - write operations
//! - `queries/` - read operations
//! - `routes.rs` - HTTP route definitions

pub mod bookings;
pub mod csv_files;
pub mod shared;

use crate::auth::CurrentUser;
use crate::selections::DatasetSelections;
use crate::source::{DatasetRef, DatasetSource};
use crate::storage::FileStorage;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;

/// Extra room for multipart boundaries and part headers around the file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Where datasets are loaded from
    pub source: Arc<dyn DatasetSource>,
    /// Upload directory
    pub storage: FileStorage,
    pub selections: DatasetSelections,
    pub max_upload_bytes: usize,
}

impl FeatureState {
    /// The dataset a caller's requests run against
    pub async fn dataset_for(&self, user: CurrentUser) -> DatasetRef {
        DatasetRef::from_selection(self.selections.get(user.id()).await)
    }}

/// Creates the API router with all feature routes mounted
///
/// - `/bookings` - records and aggregations
/// - `/csv_files` - dataset file management
pub fn router(state: FeatureState) -> Router<()> {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .nest("/bookings", bookings::bookings_routes().with_state(state.clone()))
        .nest(
            "/csv_files",
            csv_files::csv_files_routes()
                .layer(DefaultBodyLimit::max(body_limit))
                .with_state(state),
        )
}
