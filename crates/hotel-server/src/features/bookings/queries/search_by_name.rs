use crate::features::bookings::types::BookingItem;
use crate::features::shared::pagination::{SliceParams, Sliced};
use crate::features::shared::validation::{validate_search_term, SearchTermError};
use crate::source::{DatasetRef, DatasetSource};
use hotel_common::HotelError;

/// Records whose guest name contains `name`, ignoring case
#[derive(Debug, Clone)]
pub struct SearchBookingsQuery {
    pub dataset: DatasetRef,
    pub name: String,
    pub slice: SliceParams,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchBookingsError {
    #[error(transparent)]
    InvalidTerm(#[from] SearchTermError),
    #[error("{0}")]
    InvalidSlice(&'static str),
    #[error(transparent)]
    Load(#[from] HotelError),
}

impl SearchBookingsQuery {
    pub fn validate(&self) -> Result<(), SearchBookingsError> {
        validate_search_term(&self.name)?;
        self.slice.validate().map_err(SearchBookingsError::InvalidSlice)
    }
}

#[tracing::instrument(skip(source, query), fields(name = %query.name))]
pub async fn handle(
    source: &dyn DatasetSource,
    query: SearchBookingsQuery,
) -> Result<Sliced<BookingItem>, SearchBookingsError> {
    query.validate()?;

    let needle = query.name.trim().to_lowercase();
    let dataset = source.load(&query.dataset).await?;
    let matches = dataset.matching(move |record| record.name.to_lowercase().contains(&needle));

    let page = Sliced::from_iter_with(matches, &query.slice).map(BookingItem::from);
    tracing::debug!(total = page.pagination.total, "Guest name search finished");
    Ok(page)
}
