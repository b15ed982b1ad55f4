use crate::features::bookings::types::BookingItem;
use crate::source::{DatasetRef, DatasetSource};
use hotel_common::HotelError;

#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub dataset: DatasetRef,
    /// Raw path segment; ASCII digits only
    pub booking_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetBookingError {
    #[error("Booking id '{0}' must be a non-negative integer")]
    InvalidId(String),
    #[error("Booking {0} not found")]
    NotFound(usize),
    #[error(transparent)]
    Load(#[from] HotelError),
}

impl GetBookingQuery {
    pub fn validate(&self) -> Result<usize, GetBookingError> {
        let id = self.booking_id.trim();
        let invalid = || GetBookingError::InvalidId(self.booking_id.clone());
        // `usize::from_str` also accepts a leading '+'
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        id.parse::<usize>().map_err(|_| invalid())
    }
}

#[tracing::instrument(skip(source, query), fields(booking_id = %query.booking_id))]
pub async fn handle(
    source: &dyn DatasetSource,
    query: GetBookingQuery,
) -> Result<BookingItem, GetBookingError> {
    let booking_id = query.validate()?;
    let dataset = source.load(&query.dataset).await?;

    dataset
        .get(booking_id)
        .map(BookingItem::from)
        .ok_or(GetBookingError::NotFound(booking_id))
}
