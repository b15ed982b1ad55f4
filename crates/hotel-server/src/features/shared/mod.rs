//! Shared utilities and types for feature modules
//!
//! - **pagination**: `start`/`step` record slices
//! - **validation**: input checks for query parameters
//! - **test_helpers**: test doubles (test-only)

pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{SliceMetadata, SliceParams, Sliced};
pub use validation::{validate_country_code, validate_search_term};
