//! Calendar arithmetic for booking records
//!
//! Arrival dates are stored as three columns (day of month, English month name,
//! year). The booking date is never stored: it is the arrival date minus the
//! lead time, and it is recomputed whenever an aggregation needs it.
//!
//! Parsing is strict. `"February"` with day 30 is an [`HotelError::InvalidDate`],
//! never a clamped March date, and month names must be the full English names
//! exactly as the dataset spells them.

use crate::error::{HotelError, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month, ordered January..December
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from its 1-based number
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize))
            .copied()
    }

    /// 1-based month number
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Full English name, as used in the dataset
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        // chrono guarantees 1..=12
        Self::ALL[date.month0() as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|month| month.name() == s)
            .copied()
            .ok_or_else(|| HotelError::InvalidDate(format!("unknown month name '{}'", s)))
    }
}

/// Build the arrival date from its stored components
pub fn arrival_date(day: u32, month_name: &str, year: i32) -> Result<NaiveDate> {
    let month: Month = month_name.parse()?;
    date_from_parts(day, month, year)
}

/// Build a date from an already parsed month
pub fn date_from_parts(day: u32, month: Month, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.number(), day).ok_or_else(|| {
        HotelError::InvalidDate(format!("{}-{}-{} does not exist", year, month, day))
    })
}

/// Subtract a lead time (in days) from an arrival date
pub fn subtract_lead_time(arrival: NaiveDate, lead_time: i64) -> Result<NaiveDate> {
    if lead_time < 0 {
        return Err(HotelError::InvalidArgument(format!(
            "lead time must be non-negative, got {}",
            lead_time
        )));
    }

    arrival
        .checked_sub_days(Days::new(lead_time as u64))
        .ok_or_else(|| {
            HotelError::InvalidDate(format!(
                "{} minus {} days is outside the supported calendar range",
                arrival, lead_time
            ))
        })
}

/// Date the reservation was made: arrival date minus lead time
pub fn booking_date(day: u32, month_name: &str, year: i32, lead_time: i64) -> Result<NaiveDate> {
    subtract_lead_time(arrival_date(day, month_name, year)?, lead_time)
}

/// Month name of the booking date
pub fn booking_month(day: u32, month_name: &str, year: i32, lead_time: i64) -> Result<String> {
    booking_date(day, month_name, year, lead_time).map(|date| Month::of(date).to_string())
}

/// Four-digit year of the booking date
pub fn booking_year(day: u32, month_name: &str, year: i32, lead_time: i64) -> Result<String> {
    booking_date(day, month_name, year, lead_time).map(|date| format!("{:04}", date.year()))
}

/// Full English weekday name of a date ("Monday", ...)
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_month_round_trip_names() {
        for month in Month::ALL {
            assert_eq!(month.name().parse::<Month>().unwrap(), month);
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_month_parsing_is_strict() {
        assert!("july".parse::<Month>().is_err());
        assert!("Jul".parse::<Month>().is_err());
        assert!(" July".parse::<Month>().is_err());
    }

    #[test]
    fn test_arrival_date() {
        let date = arrival_date(1, "July", 2015).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2015, 7, 1).unwrap());
    }

    #[test]
    fn test_arrival_date_rejects_impossible_day() {
        assert!(matches!(
            arrival_date(30, "February", 2016),
            Err(HotelError::InvalidDate(_))
        ));
        assert!(matches!(arrival_date(0, "March", 2016), Err(HotelError::InvalidDate(_))));
        assert!(arrival_date(29, "February", 2016).is_ok());
        assert!(arrival_date(29, "February", 2015).is_err());
    }

    #[test]
    fn test_booking_date_crosses_year_boundary() {
        let date = booking_date(5, "January", 2016, 10).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2015, 12, 26).unwrap());
        assert_eq!(booking_month(5, "January", 2016, 10).unwrap(), "December");
        assert_eq!(booking_year(5, "January", 2016, 10).unwrap(), "2015");
    }

    #[test]
    fn test_zero_lead_time_is_arrival() {
        let arrival = arrival_date(15, "August", 2017).unwrap();
        assert_eq!(booking_date(15, "August", 2017, 0).unwrap(), arrival);
    }

    #[test]
    fn test_negative_lead_time_rejected() {
        assert!(matches!(
            booking_date(1, "July", 2015, -1),
            Err(HotelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_weekday_name() {
        // 2015-07-01 was a Wednesday
        let date = arrival_date(1, "July", 2015).unwrap();
        assert_eq!(weekday_name(date), "Wednesday");
    }

    proptest! {
        #[test]
        fn prop_booking_date_plus_lead_time_is_arrival(
            year in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            lead_time in 0i64..2000,
        ) {
            let name = Month::from_number(month).unwrap().name();
            let arrival = arrival_date(day, name, year).unwrap();
            let booked = booking_date(day, name, year, lead_time).unwrap();
            prop_assert_eq!(booked + Days::new(lead_time as u64), arrival);
        }

        #[test]
        fn prop_booking_month_matches_booking_date(
            year in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            lead_time in 0i64..2000,
        ) {
            let name = Month::from_number(month).unwrap().name();
            let booked = booking_date(day, name, year, lead_time).unwrap();
            prop_assert_eq!(
                booking_month(day, name, year, lead_time).unwrap(),
                Month::of(booked).name()
            );
            prop_assert_eq!(
                booking_year(day, name, year, lead_time).unwrap(),
                booked.year().to_string()
            );
        }
    }
}
