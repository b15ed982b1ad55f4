use crate::features::bookings::types::BookingItem;
use crate::features::shared::pagination::{SliceParams, Sliced};
use crate::features::shared::validation::{validate_country_code, CountryCodeError};
use crate::source::{DatasetRef, DatasetSource};
use hotel_common::HotelError;

#[derive(Debug, Clone)]
pub struct BookingsByNationalityQuery {
    pub dataset: DatasetRef,
    /// ISO 3166-1 alpha-3 code, e.g. `PRT`
    pub nationality: String,
    pub slice: SliceParams,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingsByNationalityError {
    #[error(transparent)]
    InvalidCode(#[from] CountryCodeError),
    #[error("{0}")]
    InvalidSlice(&'static str),
    #[error("No bookings from country '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Load(#[from] HotelError),
}

impl BookingsByNationalityQuery {
    pub fn validate(&self) -> Result<(), BookingsByNationalityError> {
        validate_country_code(&self.nationality)?;
        self.slice
            .validate()
            .map_err(BookingsByNationalityError::InvalidSlice)
    }
}

#[tracing::instrument(skip(source, query), fields(nationality = %query.nationality))]
pub async fn handle(
    source: &dyn DatasetSource,
    query: BookingsByNationalityQuery,
) -> Result<Sliced<BookingItem>, BookingsByNationalityError> {
    query.validate()?;

    let dataset = source.load(&query.dataset).await?;
    let code = query.nationality.clone();
    let matches = dataset.matching(move |record| record.country.as_deref() == Some(code.as_str()));

    let page = Sliced::from_iter_with(matches, &query.slice);
    if page.pagination.total == 0 {
        return Err(BookingsByNationalityError::NotFound(query.nationality));
    }
    Ok(page.map(BookingItem::from))
}
