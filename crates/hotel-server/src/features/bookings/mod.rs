pub mod queries;
pub mod routes;
pub mod types;

pub use queries::{
    BookingsByNationalityError, BookingsByNationalityQuery, GetBookingError, GetBookingQuery,
    ListBookingsError, ListBookingsQuery, RunAggregationError, RunAggregationQuery,
    SearchBookingsError, SearchBookingsQuery,
};
pub use routes::bookings_routes;
pub use types::BookingItem;
