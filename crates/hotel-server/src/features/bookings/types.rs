use crate::analytics::IndexedBooking;
use hotel_common::BookingRecord;
use serde::Serialize;

/// A booking as returned by the record endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingItem {
    /// Position of the record in its dataset
    pub booking_id: usize,
    #[serde(flatten)]
    pub record: BookingRecord,
}

impl From<IndexedBooking<'_>> for BookingItem {
    fn from(indexed: IndexedBooking<'_>) -> Self {
        Self {
            booking_id: indexed.booking_id,
            record: indexed.record.clone(),
        }
    }
}
