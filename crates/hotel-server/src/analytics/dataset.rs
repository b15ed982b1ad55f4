//! In-memory booking dataset

use hotel_common::{BookingRecord, Hotel};
use serde::Serialize;

/// Immutable snapshot of booking records in source order
///
/// The position of a record is its booking id.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<BookingRecord>,
}

/// A record together with its position in the dataset
#[derive(Debug, Clone, Serialize)]
pub struct IndexedBooking<'a> {
    pub booking_id: usize,
    #[serde(flatten)]
    pub record: &'a BookingRecord,
}

impl Dataset {
    pub fn new(records: Vec<BookingRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookingRecord> {
        self.records.iter()
    }

    pub fn get(&self, booking_id: usize) -> Option<IndexedBooking<'_>> {
        self.records
            .get(booking_id)
            .map(|record| IndexedBooking { booking_id, record })
    }

    /// Records of one hotel type
    pub fn for_hotel(&self, hotel: Hotel) -> impl Iterator<Item = &BookingRecord> {
        self.records.iter().filter(move |record| record.hotel == hotel)
    }

    /// Records matching a predicate, keeping their booking ids
    pub fn matching<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = IndexedBooking<'a>>
    where
        F: Fn(&BookingRecord) -> bool + 'a,
    {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, record)| predicate(record))
            .map(|(booking_id, record)| IndexedBooking { booking_id, record })
    }
}

impl From<Vec<BookingRecord>> for Dataset {
    fn from(records: Vec<BookingRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<BookingRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = BookingRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
