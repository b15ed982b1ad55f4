//! Hotel Analytics Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the hotel analytics workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the [`HotelError`] taxonomy shared by the engine and its adapters
//! - **Booking Model**: the [`BookingRecord`] schema and its derived fields
//! - **Dates**: month names and booking-date arithmetic
//! - **Checksums**: SHA-256 helpers for uploaded datasets
//! - **Logging**: tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use hotel_common::dates::{booking_date, booking_month};
//!
//! # fn main() -> hotel_common::Result<()> {
//! let date = booking_date(1, "July", 2015, 31)?;
//! assert_eq!(date.to_string(), "2015-05-31");
//! assert_eq!(booking_month(1, "July", 2015, 31)?, "May");
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod dates;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use dates::Month;
pub use error::{HotelError, Result};
pub use types::{BookingRecord, Hotel};
