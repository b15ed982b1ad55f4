//! Monthly revenue trend per hotel

use super::dataset::Dataset;
use super::reduce::SumAccumulator;
use chrono::{Datelike, NaiveDate};
use hotel_common::{BookingRecord, Hotel, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which date a booking is bucketed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendBasis {
    #[default]
    Booking,
    Arrival,
}

impl TrendBasis {
    fn date_of(self, record: &BookingRecord) -> Result<NaiveDate> {
        match self {
            TrendBasis::Booking => record.booking_date(),
            TrendBasis::Arrival => record.arrival_date(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub total_revenue: f64,
}

/// Mean revenue per (year, month) for each hotel, in chronological order
///
/// Cancelled bookings are skipped unless `include_canceled` is set.
pub fn revenue_trend_analysis(
    dataset: &Dataset,
    basis: TrendBasis,
    include_canceled: bool,
) -> Result<BTreeMap<Hotel, Vec<TrendPoint>>> {
    let mut groups: BTreeMap<(Hotel, i32, u32), SumAccumulator> = BTreeMap::new();

    for record in dataset.iter().filter(|r| include_canceled || !r.is_canceled) {
        let date = basis.date_of(record)?;
        groups
            .entry((record.hotel, date.year(), date.month()))
            .or_default()
            .push(record.total_revenue());
    }

    let mut trend: BTreeMap<Hotel, Vec<TrendPoint>> = BTreeMap::new();
    for ((hotel, year, month), acc) in groups {
        if let Some(mean) = acc.mean() {
            trend.entry(hotel).or_default().push(TrendPoint {
                year,
                month,
                total_revenue: mean,
            });
        }
    }
    Ok(trend)
}
