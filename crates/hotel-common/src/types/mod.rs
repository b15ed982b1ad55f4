//! Booking record model
//!
//! [`BookingRecord`] mirrors one CSV row. Field names follow Rust conventions;
//! the serde renames map them back to the dataset's column headers, so the
//! same struct is read straight from a CSV reader and written to API responses.
//!
//! Derived quantities (arrival/booking dates, stay length, revenue, guest
//! count) are computed on demand and never stored.

mod de;

use crate::dates::{self, Month};
use crate::error::{HotelError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hotel type. Declaration order matches the alphabetical order of the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hotel {
    #[serde(rename = "City Hotel")]
    CityHotel,
    #[serde(rename = "Resort Hotel")]
    ResortHotel,
}

impl Hotel {
    pub fn label(self) -> &'static str {
        match self {
            Hotel::CityHotel => "City Hotel",
            Hotel::ResortHotel => "Resort Hotel",
        }
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Hotel {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "City Hotel" => Ok(Hotel::CityHotel),
            "Resort Hotel" => Ok(Hotel::ResortHotel),
            other => Err(HotelError::InvalidArgument(format!("unknown hotel type '{}'", other))),
        }
    }
}

/// One booking as stored in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub hotel: Hotel,

    #[serde(deserialize_with = "de::flag")]
    pub is_canceled: bool,

    #[serde(deserialize_with = "de::flag")]
    pub is_repeated_guest: bool,

    pub lead_time: u32,

    #[serde(rename = "arrival_date_day_of_month")]
    pub arrival_day: u32,

    #[serde(rename = "arrival_date_month")]
    pub arrival_month: String,

    #[serde(rename = "arrival_date_year")]
    pub arrival_year: i32,

    #[serde(rename = "arrival_date_week_number")]
    pub arrival_week_number: u32,

    #[serde(rename = "stays_in_week_nights")]
    pub stays_week_nights: u32,

    #[serde(rename = "stays_in_weekend_nights")]
    pub stays_weekend_nights: u32,

    /// Average daily rate; negative values occur in the raw data
    pub adr: f64,

    pub adults: u32,

    /// `NA` in a few rows of the public dataset
    #[serde(deserialize_with = "de::optional_count")]
    pub children: Option<u32>,

    pub babies: u32,

    #[serde(deserialize_with = "de::country_code")]
    pub country: Option<String>,

    pub meal: String,

    pub name: String,

    pub market_segment: String,

    pub customer_type: String,

    pub reservation_status: String,

    pub previous_cancellations: u32,

    pub previous_bookings_not_canceled: u32,

    pub booking_changes: u32,

    /// Travel agency id; `NULL` for direct bookings
    #[serde(deserialize_with = "de::optional_count")]
    pub agent: Option<u32>,

    /// Company id; `NULL` for private guests
    #[serde(deserialize_with = "de::optional_count")]
    pub company: Option<u32>,

    #[serde(rename = "days_in_waiting_list")]
    pub days_in_waiting_list: u32,

    pub required_car_parking_spaces: u32,

    pub total_of_special_requests: u32,
}

impl BookingRecord {
    pub fn arrival_date(&self) -> Result<NaiveDate> {
        dates::arrival_date(self.arrival_day, &self.arrival_month, self.arrival_year)
    }

    pub fn booking_date(&self) -> Result<NaiveDate> {
        dates::subtract_lead_time(self.arrival_date()?, i64::from(self.lead_time))
    }

    pub fn booking_month(&self) -> Result<Month> {
        self.booking_date().map(Month::of)
    }

    pub fn booking_year(&self) -> Result<i32> {
        self.booking_date().map(|date| date.year())
    }

    pub fn total_stay(&self) -> u64 {
        u64::from(self.stays_week_nights) + u64::from(self.stays_weekend_nights)
    }

    pub fn total_revenue(&self) -> f64 {
        self.adr * self.total_stay() as f64
    }

    /// Adults, children and babies; a missing children count adds nothing
    pub fn total_guests(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children.unwrap_or(0)) + u64::from(self.babies)
    }
}

#[cfg(any(test, feature = "testing"))]
pub mod fixtures {
    //! Builders for booking records in tests

    use super::{BookingRecord, Hotel};

    /// Fluent builder producing a valid [`BookingRecord`]
    #[derive(Debug, Clone)]
    pub struct BookingBuilder {
        record: BookingRecord,
    }

    impl BookingBuilder {
        /// A two-night City Hotel stay arriving 2015-07-01, booked the same day
        pub fn new() -> Self {
            Self {
                record: BookingRecord {
                    hotel: Hotel::CityHotel,
                    is_canceled: false,
                    is_repeated_guest: false,
                    lead_time: 0,
                    arrival_day: 1,
                    arrival_month: "July".to_string(),
                    arrival_year: 2015,
                    arrival_week_number: 27,
                    stays_week_nights: 2,
                    stays_weekend_nights: 0,
                    adr: 100.0,
                    adults: 2,
                    children: Some(0),
                    babies: 0,
                    country: Some("PRT".to_string()),
                    meal: "BB".to_string(),
                    name: "Guest".to_string(),
                    market_segment: "Online TA".to_string(),
                    customer_type: "Transient".to_string(),
                    reservation_status: "Check-Out".to_string(),
                    previous_cancellations: 0,
                    previous_bookings_not_canceled: 0,
                    booking_changes: 0,
                    agent: Some(9),
                    company: None,
                    days_in_waiting_list: 0,
                    required_car_parking_spaces: 0,
                    total_of_special_requests: 0,
                },
            }
        }

        pub fn hotel(mut self, hotel: Hotel) -> Self {
            self.record.hotel = hotel;
            self
        }

        pub fn resort(self) -> Self {
            self.hotel(Hotel::ResortHotel)
        }

        pub fn canceled(mut self, canceled: bool) -> Self {
            self.record.is_canceled = canceled;
            self
        }

        pub fn repeated_guest(mut self, repeated: bool) -> Self {
            self.record.is_repeated_guest = repeated;
            self
        }

        pub fn arrival(mut self, day: u32, month: &str, year: i32) -> Self {
            self.record.arrival_day = day;
            self.record.arrival_month = month.to_string();
            self.record.arrival_year = year;
            self
        }

        pub fn lead_time(mut self, days: u32) -> Self {
            self.record.lead_time = days;
            self
        }

        pub fn nights(mut self, week: u32, weekend: u32) -> Self {
            self.record.stays_week_nights = week;
            self.record.stays_weekend_nights = weekend;
            self
        }

        pub fn adr(mut self, adr: f64) -> Self {
            self.record.adr = adr;
            self
        }

        pub fn guests(mut self, adults: u32, children: Option<u32>, babies: u32) -> Self {
            self.record.adults = adults;
            self.record.children = children;
            self.record.babies = babies;
            self
        }

        pub fn country(mut self, country: Option<&str>) -> Self {
            self.record.country = country.map(str::to_string);
            self
        }

        pub fn meal(mut self, meal: &str) -> Self {
            self.record.meal = meal.to_string();
            self
        }

        pub fn name(mut self, name: &str) -> Self {
            self.record.name = name.to_string();
            self
        }

        pub fn agent(mut self, agent: Option<u32>) -> Self {
            self.record.agent = agent;
            self
        }

        pub fn company(mut self, company: Option<u32>) -> Self {
            self.record.company = company;
            self
        }

        pub fn build(self) -> BookingRecord {
            self.record
        }
    }

    impl Default for BookingBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Columns of the raw dataset that the record model does not keep
    const UNMODELLED: [(&str, &str); 8] = [
        ("assigned_room_type", "A"),
        ("credit_card", "************4321"),
        ("deposit_type", "No Deposit"),
        ("distribution_channel", "TA/TO"),
        ("email", "guest@example.com"),
        ("phone-number", "555-0100"),
        ("reservation_status_date", "2015-07-03"),
        ("reserved_room_type", "A"),
    ];

    /// Render records as a CSV document with the full dataset header
    pub fn csv_document(records: &[BookingRecord]) -> String {
        let flag = |value: bool| if value { "1" } else { "0" }.to_string();

        let mut header: Vec<&str> = vec![
            "hotel",
            "is_canceled",
            "lead_time",
            "arrival_date_year",
            "arrival_date_month",
            "arrival_date_week_number",
            "arrival_date_day_of_month",
            "stays_in_weekend_nights",
            "stays_in_week_nights",
            "adults",
            "children",
            "babies",
            "meal",
            "country",
            "market_segment",
            "is_repeated_guest",
            "previous_cancellations",
            "previous_bookings_not_canceled",
            "booking_changes",
            "agent",
            "company",
            "days_in_waiting_list",
            "customer_type",
            "adr",
            "required_car_parking_spaces",
            "total_of_special_requests",
            "reservation_status",
            "name",
        ];
        header.extend(UNMODELLED.iter().map(|(column, _)| *column));

        let mut out = header.join(",");
        out.push('\n');

        for r in records {
            let mut row: Vec<String> = vec![
                r.hotel.label().to_string(),
                flag(r.is_canceled),
                r.lead_time.to_string(),
                r.arrival_year.to_string(),
                r.arrival_month.clone(),
                r.arrival_week_number.to_string(),
                r.arrival_day.to_string(),
                r.stays_weekend_nights.to_string(),
                r.stays_week_nights.to_string(),
                r.adults.to_string(),
                r.children.map_or_else(|| "NA".to_string(), |c| c.to_string()),
                r.babies.to_string(),
                r.meal.clone(),
                r.country.clone().unwrap_or_else(|| "NULL".to_string()),
                r.market_segment.clone(),
                flag(r.is_repeated_guest),
                r.previous_cancellations.to_string(),
                r.previous_bookings_not_canceled.to_string(),
                r.booking_changes.to_string(),
                r.agent.map_or_else(|| "NULL".to_string(), |a| a.to_string()),
                r.company.map_or_else(|| "NULL".to_string(), |c| c.to_string()),
                r.days_in_waiting_list.to_string(),
                r.customer_type.clone(),
                r.adr.to_string(),
                r.required_car_parking_spaces.to_string(),
                r.total_of_special_requests.to_string(),
                r.reservation_status.clone(),
                r.name.clone(),
            ];
            row.extend(UNMODELLED.iter().map(|(_, value)| value.to_string()));

            out.push_str(&row.join(","));
            out.push('\n');
        }

        out
    }
}
