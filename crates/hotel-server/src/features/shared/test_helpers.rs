//! Test doubles for feature tests

use crate::analytics::Dataset;
use crate::source::{DatasetRef, DatasetSource};
use async_trait::async_trait;
use hotel_common::{BookingRecord, HotelError, Result};
use std::sync::{Arc, Mutex};

/// Serves one fixed dataset for every reference, or nothing at all
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Option<Dataset>,
    reject_ingest: bool,
    forgotten: Arc<Mutex<Vec<String>>>,
}

impl StaticSource {
    pub fn new(records: Vec<BookingRecord>) -> Self {
        Self {
            dataset: Some(Dataset::new(records)),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// A source whose `ingest` always fails
    pub fn rejecting_ingest() -> Self {
        Self {
            reject_ingest: true,
            ..Self::default()
        }
    }

    /// Names passed to `forget`, in call order
    pub fn forgotten(&self) -> Vec<String> {
        self.forgotten.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn load(&self, dataset: &DatasetRef) -> Result<Dataset> {
        self.dataset
            .clone()
            .ok_or_else(|| HotelError::SourceUnavailable(format!("{} is not loaded", dataset)))
    }

    async fn ingest(&self, name: &str, _dataset: &Dataset) -> Result<()> {
        if self.reject_ingest {
            return Err(HotelError::Database(format!("cannot ingest {}", name)));
        }
        Ok(())
    }

    async fn forget(&self, name: &str) -> Result<()> {
        self.forgotten.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "static"
    }
}
