pub mod by_nationality;
pub mod get_booking;
pub mod list_bookings;
pub mod run_aggregation;
pub mod search_by_name;

pub use by_nationality::{BookingsByNationalityError, BookingsByNationalityQuery};
pub use get_booking::{GetBookingError, GetBookingQuery};
pub use list_bookings::{ListBookingsError, ListBookingsQuery};
pub use run_aggregation::{RunAggregationError, RunAggregationQuery};
pub use search_by_name::{SearchBookingsError, SearchBookingsQuery};
