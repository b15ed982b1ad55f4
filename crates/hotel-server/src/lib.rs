//! Hotel Analytics Server Library
#![recursion_limit = "256"]
//!
//! HTTP server answering analytical questions over hotel booking datasets.
//!
//! # Overview
//!
//! - **Analytics Engine**: the aggregation catalogue over an in-memory [`analytics::Dataset`]
//! - **Dataset Sources**: CSV files on disk or a PostgreSQL table behind one trait
//! - **Uploads**: multipart CSV upload, listing, deletion and per-caller selection
//! - **Configuration**: environment-based configuration management
//! - **Middleware**: CORS and request logging
//!
//! # Architecture
//!
//! Each feature is a vertical slice of commands and queries:
//!
//! - **Commands** (write operations): upload, delete, select a dataset
//! - **Queries** (read operations): record listings and aggregations
//!
//! Handlers load the caller's dataset through a [`source::DatasetSource`], run a
//! pure computation from [`analytics`] and shape the result into JSON.
//!
//! # Example
//!
//! ```no_run
//! use hotel_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let state = api::AppState::from_config(&config).await?;
//!     let app = api::create_router(state, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod selections;
pub mod source;
pub mod storage;

// Re-export commonly used types
pub use error::AppError;
