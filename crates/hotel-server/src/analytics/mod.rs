//! Aggregation engine
//!
//! Pure computations over an in-memory [`Dataset`]. Nothing in this module
//! performs I/O; the dataset is loaded by a [`crate::source::DatasetSource`]
//! before any aggregation runs.

pub mod aggregations;
pub mod catalogue;
pub mod dataset;
pub mod reduce;
pub mod shaping;
pub mod stats;
pub mod trend;

pub use catalogue::Aggregation;
pub use dataset::{Dataset, IndexedBooking};
pub use trend::TrendBasis;
