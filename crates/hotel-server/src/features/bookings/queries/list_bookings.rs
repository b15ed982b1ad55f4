use crate::features::bookings::types::BookingItem;
use crate::features::shared::pagination::{SliceParams, Sliced};
use crate::source::{DatasetRef, DatasetSource};
use hotel_common::HotelError;

#[derive(Debug, Clone)]
pub struct ListBookingsQuery {
    pub dataset: DatasetRef,
    pub slice: SliceParams,
}

#[derive(Debug, thiserror::Error)]
pub enum ListBookingsError {
    #[error("{0}")]
    InvalidSlice(&'static str),
    #[error(transparent)]
    Load(#[from] HotelError),
}

impl ListBookingsQuery {
    pub fn validate(&self) -> Result<(), ListBookingsError> {
        self.slice.validate().map_err(ListBookingsError::InvalidSlice)
    }
}

#[tracing::instrument(skip(source, query), fields(start = ?query.slice.start, step = ?query.slice.step))]
pub async fn handle(
    source: &dyn DatasetSource,
    query: ListBookingsQuery,
) -> Result<Sliced<BookingItem>, ListBookingsError> {
    query.validate()?;

    let dataset = source.load(&query.dataset).await?;
    Ok(Sliced::from_iter_with(dataset.matching(|_| true), &query.slice).map(BookingItem::from))
}
