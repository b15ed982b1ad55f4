//! Shared validation utilities
//!
//! # Examples
//!
//! ```
//! use hotel_server::features::shared::validation::validate_country_code;
//!
//! assert!(validate_country_code("PRT").is_ok());
//! assert!(validate_country_code("prt").is_err());
//! ```

use thiserror::Error;

/// Longest accepted guest-name search term
pub const MAX_SEARCH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountryCodeError {
    #[error("Nationality is required")]
    Required,

    #[error("Nationality '{0}' must be a 3-letter uppercase ISO code")]
    InvalidFormat(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchTermError {
    #[error("Search term is required and cannot be empty")]
    Required,

    #[error("Search term must not exceed {max_length} characters")]
    TooLong { max_length: usize },
}

/// Validate an ISO 3166-1 alpha-3 country code
///
/// # Rules
/// - Exactly three characters
/// - Uppercase ASCII letters only
pub fn validate_country_code(code: &str) -> Result<(), CountryCodeError> {
    if code.is_empty() {
        return Err(CountryCodeError::Required);
    }
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(CountryCodeError::InvalidFormat(code.to_string()));
    }
    Ok(())
}

/// Validate a guest-name search term; surrounding whitespace is ignored
pub fn validate_search_term(term: &str) -> Result<(), SearchTermError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(SearchTermError::Required);
    }
    if term.chars().count() > MAX_SEARCH_LENGTH {
        return Err(SearchTermError::TooLong {
            max_length: MAX_SEARCH_LENGTH,
        });
    }
    Ok(())
}
