use crate::analytics::Aggregation;
use crate::source::{DatasetRef, DatasetSource};
use hotel_common::HotelError;
use serde_json::Value;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct RunAggregationQuery {
    pub dataset: DatasetRef,
    pub aggregation: Aggregation,
}

#[derive(Debug, thiserror::Error)]
pub enum RunAggregationError {
    #[error(transparent)]
    Load(HotelError),
    #[error(transparent)]
    Aggregation(HotelError),
}

impl RunAggregationError {
    pub fn into_inner(self) -> HotelError {
        match self {
            RunAggregationError::Load(e) | RunAggregationError::Aggregation(e) => e,
        }
    }
}

#[tracing::instrument(
    skip(source, query),
    fields(aggregation = query.aggregation.name(), dataset = %query.dataset)
)]
pub async fn handle(
    source: &dyn DatasetSource,
    query: RunAggregationQuery,
) -> Result<Value, RunAggregationError> {
    let dataset = source
        .load(&query.dataset)
        .await
        .map_err(RunAggregationError::Load)?;

    let started = Instant::now();
    let body = query
        .aggregation
        .run(&dataset)
        .map_err(RunAggregationError::Aggregation)?;

    tracing::debug!(
        records = dataset.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Aggregation computed"
    );

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::StaticSource;
    use hotel_common::types::fixtures::BookingBuilder;
    use serde_json::json;

    #[tokio::test]
    async fn test_runs_against_loaded_dataset() {
        let source = StaticSource::new(vec![
            BookingBuilder::new().meal("HB").build(),
            BookingBuilder::new().meal("BB").build(),
            BookingBuilder::new().meal("HB").build(),
        ]);

        let body = handle(
            &source,
            RunAggregationQuery {
                dataset: DatasetRef::Default,
                aggregation: Aggregation::PopularMealPackage,
            },
        )
        .await
        .unwrap();

        assert_eq!(body, json!({"HB": 2}));
    }

    #[tokio::test]
    async fn test_empty_dataset_percentage_is_an_aggregation_error() {
        let source = StaticSource::new(Vec::new());
        let err = handle(
            &source,
            RunAggregationQuery {
                dataset: DatasetRef::Default,
                aggregation: Aggregation::RepeatedGuestsPercentage,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            RunAggregationError::Aggregation(HotelError::EmptyDataset(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_dataset_is_a_load_error() {
        let source = StaticSource::unavailable();
        let err = handle(
            &source,
            RunAggregationQuery {
                dataset: DatasetRef::Named("gone.csv".into()),
                aggregation: Aggregation::TopCountries,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err.into_inner(), HotelError::SourceUnavailable(_)));
    }
}
