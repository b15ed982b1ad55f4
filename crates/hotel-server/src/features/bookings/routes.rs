//! Booking API routes
//!
//! Every route runs against the caller's selected dataset (see
//! [`FeatureState::dataset_for`]) and requires an `x-user-id` header.
//!
//! # Route Structure
//!
//! - `GET /bookings?start&step` - records, paginated
//! - `GET /bookings/search?name=..` - records by guest name
//! - `GET /bookings/nationality?nationality=PRT` - records by country
//! - `GET /bookings/:booking_id` - one record
//! - `GET /bookings/<aggregation>` - one of the fixed aggregations
//!
//! Aggregation bodies are returned as computed, without the envelope.

use crate::analytics::{Aggregation, TrendBasis};
use crate::api::response::ApiResponse;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::features::shared::pagination::{SliceParams, Sliced};
use crate::features::FeatureState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::queries::{
    BookingsByNationalityError, BookingsByNationalityQuery, GetBookingError, GetBookingQuery,
    ListBookingsError, ListBookingsQuery, RunAggregationError, RunAggregationQuery,
    SearchBookingsError, SearchBookingsQuery,
};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn bookings_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_bookings))
        .route("/get_popular_meal_package", get(get_popular_meal_package))
        .route("/get_avg_length_of_stay", get(get_avg_length_of_stay))
        .route("/total_revenue", get(get_total_revenue))
        .route("/top_countries", get(get_top_countries))
        .route("/repeated_guests_percentage", get(get_repeated_guests_percentage))
        .route("/total_guests_by_year", get(get_total_guests_by_year))
        .route("/avg_daily_rate_resort", get(get_avg_daily_rate_resort))
        .route("/most_common_arrival_day_city", get(get_most_common_arrival_day_city))
        .route("/count_by_hotel_meal", get(get_count_by_hotel_meal))
        .route("/total_revenue_resort_by_country", get(get_total_revenue_resort_by_country))
        .route("/count_by_hotel_repeated_guest", get(get_count_by_hotel_repeated_guest))
        .route("/analysis", get(get_analysis))
        .route("/stats", get(get_stats))
        .route("/search", get(search_bookings))
        .route("/nationality", get(get_by_nationality))
        .route("/:booking_id", get(get_booking))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NationalityParams {
    pub nationality: Option<String>,
}

/// `GET /bookings/analysis` parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Include cancelled bookings; defaults to false
    pub is_canceled: Option<bool>,
    /// `booking` (default) or `arrival`
    pub type_group: Option<TrendBasis>,
}

fn paginated<T: Serialize>(page: Sliced<T>) -> Response {
    let meta = json!({ "pagination": page.pagination });
    (StatusCode::OK, Json(ApiResponse::success_with_meta(page.items, meta))).into_response()
}

// ============================================================================
// Record Handlers
// ============================================================================

/// `GET /bookings?start=0&step=20`
#[tracing::instrument(skip(state, slice), fields(user = %user))]
async fn list_bookings(
    State(state): State<FeatureState>,
    user: CurrentUser,
    slice: Result<Query<SliceParams>, QueryRejection>,
) -> Result<Response, BookingsApiError> {
    let Query(slice) = slice?;
    let query = ListBookingsQuery {
        dataset: state.dataset_for(user).await,
        slice,
    };

    let page = super::queries::list_bookings::handle(state.source.as_ref(), query).await?;
    Ok(paginated(page))
}

/// `GET /bookings/search?name=smith&start=0&step=20`
#[tracing::instrument(skip(state, params, slice), fields(user = %user))]
async fn search_bookings(
    State(state): State<FeatureState>,
    user: CurrentUser,
    params: Result<Query<SearchParams>, QueryRejection>,
    slice: Result<Query<SliceParams>, QueryRejection>,
) -> Result<Response, BookingsApiError> {
    let (Query(params), Query(slice)) = (params?, slice?);
    let query = SearchBookingsQuery {
        dataset: state.dataset_for(user).await,
        name: params.name.unwrap_or_default(),
        slice,
    };

    let page = super::queries::search_by_name::handle(state.source.as_ref(), query).await?;
    Ok(paginated(page))
}

/// `GET /bookings/nationality?nationality=PRT&start=0&step=20`
///
/// - `400 Bad Request` - code is not three uppercase letters
/// - `404 Not Found` - no booking from that country
#[tracing::instrument(skip(state, params, slice), fields(user = %user))]
async fn get_by_nationality(
    State(state): State<FeatureState>,
    user: CurrentUser,
    params: Result<Query<NationalityParams>, QueryRejection>,
    slice: Result<Query<SliceParams>, QueryRejection>,
) -> Result<Response, BookingsApiError> {
    let (Query(params), Query(slice)) = (params?, slice?);
    let query = BookingsByNationalityQuery {
        dataset: state.dataset_for(user).await,
        nationality: params.nationality.unwrap_or_default(),
        slice,
    };

    let page = super::queries::by_nationality::handle(state.source.as_ref(), query).await?;
    Ok(paginated(page))
}

/// `GET /bookings/:booking_id`
///
/// - `400 Bad Request` - id is not a non-negative integer
/// - `404 Not Found` - id is past the end of the dataset
#[tracing::instrument(skip(state), fields(user = %user))]
async fn get_booking(
    State(state): State<FeatureState>,
    user: CurrentUser,
    Path(booking_id): Path<String>,
) -> Result<Response, BookingsApiError> {
    let query = GetBookingQuery {
        dataset: state.dataset_for(user).await,
        booking_id,
    };

    let item = super::queries::get_booking::handle(state.source.as_ref(), query).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(item))).into_response())
}

// ============================================================================
// Aggregation Handlers
// ============================================================================

async fn aggregate(
    state: &FeatureState,
    user: CurrentUser,
    aggregation: Aggregation,
) -> Result<Response, BookingsApiError> {
    let query = RunAggregationQuery {
        dataset: state.dataset_for(user).await,
        aggregation,
    };

    let body = super::queries::run_aggregation::handle(state.source.as_ref(), query).await?;
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Most frequent meal package: `{"BB": 9}`
async fn get_popular_meal_package(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::PopularMealPackage).await
}

/// Mean nights per stay for each hotel
async fn get_avg_length_of_stay(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::AvgLengthOfStay).await
}

/// Revenue by hotel and booking month
async fn get_total_revenue(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::TotalRevenueByMonthHotel).await
}

async fn get_top_countries(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::TopCountries).await
}

/// `400` on an empty dataset
async fn get_repeated_guests_percentage(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::RepeatedGuestsPercentage).await
}

async fn get_total_guests_by_year(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::TotalGuestsByYear).await
}

/// Resort Hotel mean ADR per booking month, highest first
async fn get_avg_daily_rate_resort(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::AvgDailyRateByMonthResort).await
}

async fn get_most_common_arrival_day_city(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::MostCommonArrivalWeekdayCity).await
}

async fn get_count_by_hotel_meal(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::CountByHotelMeal).await
}

async fn get_total_revenue_resort_by_country(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::TotalRevenueResortByCountry).await
}

async fn get_count_by_hotel_repeated_guest(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::CountByHotelRepeatedGuest).await
}

/// `GET /bookings/analysis?is_canceled=false&type_group=booking`
#[tracing::instrument(skip(state, params), fields(user = %user))]
async fn get_analysis(
    State(state): State<FeatureState>,
    user: CurrentUser,
    params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Response, BookingsApiError> {
    let Query(params) = params?;
    let aggregation = Aggregation::RevenueTrend {
        basis: params.type_group.unwrap_or_default(),
        include_canceled: params.is_canceled.unwrap_or(false),
    };
    aggregate(&state, user, aggregation).await
}

async fn get_stats(
    State(state): State<FeatureState>,
    user: CurrentUser,
) -> Result<Response, BookingsApiError> {
    aggregate(&state, user, Aggregation::DescriptiveStats).await
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for booking API endpoints
#[derive(Debug)]
enum BookingsApiError {
    BadQuery(QueryRejection),
    Aggregation(RunAggregationError),
    Get(GetBookingError),
    List(ListBookingsError),
    Search(SearchBookingsError),
    Nationality(BookingsByNationalityError),
}

impl From<QueryRejection> for BookingsApiError {
    fn from(err: QueryRejection) -> Self {
        Self::BadQuery(err)
    }
}

impl From<RunAggregationError> for BookingsApiError {
    fn from(err: RunAggregationError) -> Self {
        Self::Aggregation(err)
    }
}

impl From<GetBookingError> for BookingsApiError {
    fn from(err: GetBookingError) -> Self {
        Self::Get(err)
    }
}

impl From<ListBookingsError> for BookingsApiError {
    fn from(err: ListBookingsError) -> Self {
        Self::List(err)
    }
}

impl From<SearchBookingsError> for BookingsApiError {
    fn from(err: SearchBookingsError) -> Self {
        Self::Search(err)
    }
}

impl From<BookingsByNationalityError> for BookingsApiError {
    fn from(err: BookingsByNationalityError) -> Self {
        Self::Nationality(err)
    }
}

impl From<BookingsApiError> for AppError {
    fn from(err: BookingsApiError) -> Self {
        match err {
            BookingsApiError::BadQuery(rejection) => AppError::Validation(rejection.body_text()),
            BookingsApiError::Aggregation(e) => AppError::from(e.into_inner()),

            BookingsApiError::Get(e @ GetBookingError::InvalidId(_)) => {
                AppError::Validation(e.to_string())
            },
            BookingsApiError::Get(e @ GetBookingError::NotFound(_)) => {
                AppError::NotFound(e.to_string())
            },
            BookingsApiError::Get(GetBookingError::Load(e)) => AppError::from(e),

            BookingsApiError::List(e @ ListBookingsError::InvalidSlice(_)) => {
                AppError::Validation(e.to_string())
            },
            BookingsApiError::List(ListBookingsError::Load(e)) => AppError::from(e),

            BookingsApiError::Search(SearchBookingsError::Load(e)) => AppError::from(e),
            BookingsApiError::Search(e) => AppError::Validation(e.to_string()),

            BookingsApiError::Nationality(e @ BookingsByNationalityError::NotFound(_)) => {
                AppError::NotFound(e.to_string())
            },
            BookingsApiError::Nationality(BookingsByNationalityError::Load(e)) => {
                AppError::from(e)
            },
            BookingsApiError::Nationality(e) => AppError::Validation(e.to_string()),
        }
    }
}

impl IntoResponse for BookingsApiError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
