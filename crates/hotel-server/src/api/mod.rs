pub mod response;

use crate::config::{Config, DatasetBackend};
use crate::db;
use crate::features::{self, FeatureState};
use crate::middleware;
use crate::selections::DatasetSelections;
use crate::source::{CsvFileSource, DatasetSource, PgTableSource};
use crate::storage::FileStorage;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub features: FeatureState,
    /// Present only with the postgres backend
    pub db: Option<PgPool>,
}

impl AppState {
    /// Build the dataset source and storage selected by `config`
    ///
    /// With the postgres backend this connects to the database and applies
    /// pending migrations.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        // The upload directory is created by the first upload
        let storage = FileStorage::new(config.storage.clone());

        let (source, db): (Arc<dyn DatasetSource>, Option<PgPool>) = match config.backend {
            DatasetBackend::File => (
                Arc::new(CsvFileSource::new(
                    storage.clone(),
                    config.storage.demo_dataset.clone(),
                )),
                None,
            ),
            DatasetBackend::Postgres => {
                let pool = db::create_pool(&db::DbConfig::from(&config.database)).await?;
                db::run_migrations(&pool).await?;
                let source =
                    PgTableSource::new(pool.clone(), config.database.default_dataset.clone());
                (Arc::new(source), Some(pool))
            },
        };

        tracing::info!(backend = source.backend(), "Dataset source ready");

        Ok(Self {
            features: FeatureState {
                source,
                storage,
                selections: DatasetSelections::new(),
                max_upload_bytes: config.storage.max_upload_bytes,
            },
            db,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_routes = features::router(state.features.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .merge(feature_routes)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Hotel Analytics Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(state): State<AppState>) -> Response {
    let backend = state.features.source.backend();

    if let Some(pool) = &state.db {
        if let Err(e) = db::health_check(pool).await {
            tracing::error!("Database health check failed: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "backend": backend,
                    "database": "disconnected"
                })),
            )
                .into_response();
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "backend": backend
        })),
    )
        .into_response()
}
