//! Shared slice pagination
//!
//! Record listings are paged with `start` (offset of the first record) and
//! `step` (number of records per page).
//!
//! # Examples
//!
//! ```
//! use hotel_server::features::shared::pagination::{SliceParams, Sliced};
//!
//! let params = SliceParams::new(Some(2), Some(3));
//! let page = Sliced::from_iter_with(0..10, &params);
//! assert_eq!(page.items, vec![2, 3, 4]);
//! assert_eq!(page.pagination.total, 10);
//! assert!(page.pagination.has_next);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of records per page
pub const DEFAULT_STEP: usize = 20;

/// Largest accepted page size
pub const MAX_STEP: usize = 100;

/// Slice request parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SliceParams {
    /// Offset of the first record. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,

    /// Records per page. Defaults to 20, at most 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
}

impl SliceParams {
    pub fn new(start: Option<usize>, step: Option<usize>) -> Self {
        Self { start, step }
    }

    pub fn start(&self) -> usize {
        self.start.unwrap_or(0)
    }

    pub fn step(&self) -> usize {
        self.step.unwrap_or(DEFAULT_STEP).clamp(1, MAX_STEP)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(step) = self.step {
            if !(1..=MAX_STEP).contains(&step) {
                return Err("Step must be between 1 and 100");
            }
        }
        Ok(())
    }
}

/// Pagination metadata for a slice response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceMetadata {
    pub start: usize,
    pub step: usize,
    /// Records matching the request before slicing
    pub total: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl SliceMetadata {
    pub fn new(start: usize, step: usize, total: usize) -> Self {
        Self {
            start,
            step,
            total,
            has_next: start.saturating_add(step) < total,
            has_prev: start > 0 && total > 0,
        }
    }
}

/// One page of items with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sliced<T> {
    pub items: Vec<T>,
    pub pagination: SliceMetadata,
}

impl<T> Sliced<T> {
    /// Take one page from `iter`, counting everything it yields
    pub fn from_iter_with<I>(iter: I, params: &SliceParams) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let (start, step) = (params.start(), params.step());
        let mut total = 0;
        let mut items = Vec::with_capacity(step);

        for item in iter {
            if total >= start && items.len() < step {
                items.push(item);
            }
            total += 1;
        }

        Self {
            items,
            pagination: SliceMetadata::new(start, step, total),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Sliced<U> {
        Sliced {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
