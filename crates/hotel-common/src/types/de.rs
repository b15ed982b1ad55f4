//! Lenient field decoders for the raw CSV encoding
//!
//! The CSV reader hands over loosely typed fields: flags are `0`/`1`, counts
//! sometimes appear as `2.0` or `NA`, and missing countries show up as empty,
//! `NA` or `NULL`.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::fmt;

const MISSING: [&str; 4] = ["", "NA", "NULL", "nan"];

pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("0, 1, true or false")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim() {
                "0" | "false" | "False" => Ok(false),
                "1" | "true" | "True" => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

pub(super) fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative whole number or NA")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(CountVisitor)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            u32::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            u32::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_nan() {
                return Ok(None);
            }
            if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
                return Err(E::invalid_value(Unexpected::Float(v), &self));
            }
            Ok(Some(v as u32))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if MISSING.contains(&trimmed) {
                return Ok(None);
            }
            if let Ok(n) = trimmed.parse::<u64>() {
                return self.visit_u64(n);
            }
            match trimmed.parse::<f64>() {
                Ok(f) => self.visit_f64(f),
                Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

pub(super) fn country_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|code| code.trim().to_string())
        .filter(|code| !MISSING.contains(&code.as_str())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::types::{BookingRecord, Hotel};

    const HEADER: &str = "hotel,is_canceled,lead_time,arrival_date_year,arrival_date_month,\
arrival_date_week_number,arrival_date_day_of_month,stays_in_weekend_nights,stays_in_week_nights,\
adults,children,babies,meal,country,market_segment,is_repeated_guest,previous_cancellations,\
previous_bookings_not_canceled,booking_changes,days_in_waiting_list,customer_type,adr,\
required_car_parking_spaces,total_of_special_requests,reservation_status,name";

    fn parse(row: &str) -> Result<BookingRecord, csv::Error> {
        let data = format!("{}\n{}\n", HEADER, row);
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        reader.deserialize().next().unwrap()
    }

    #[test]
    fn test_parses_raw_row() {
        let record = parse(
            "Resort Hotel,0,342,2015,July,27,1,0,0,2,0,0,BB,PRT,Direct,0,0,0,3,0,Transient,0,0,0,Check-Out,Ernest Barnes",
        )
        .unwrap();

        assert_eq!(record.hotel, Hotel::ResortHotel);
        assert!(!record.is_canceled);
        assert_eq!(record.lead_time, 342);
        assert_eq!(record.children, Some(0));
        assert_eq!(record.country.as_deref(), Some("PRT"));
        assert_eq!(record.name, "Ernest Barnes");
    }

    #[test]
    fn test_lenient_children_and_country() {
        let record = parse(
            "City Hotel,1,10,2016,May,20,12,1,2,2,NA,0,HB,NULL,Online TA,1,0,0,0,0,Transient,95.5,0,1,Canceled,Jo",
        )
        .unwrap();

        assert!(record.is_canceled);
        assert!(record.is_repeated_guest);
        assert_eq!(record.children, None);
        assert_eq!(record.country, None);

        let record = parse(
            "City Hotel,0,10,2016,May,20,12,1,2,2,2.0,0,HB,,Online TA,0,0,0,0,0,Transient,95.5,0,1,Check-Out,Jo",
        )
        .unwrap();
        assert_eq!(record.children, Some(2));
        assert_eq!(record.country, None);
    }

    #[test]
    fn test_rejects_bad_flag() {
        let result = parse(
            "City Hotel,2,10,2016,May,20,12,1,2,2,0,0,HB,PRT,Online TA,0,0,0,0,0,Transient,95.5,0,1,Check-Out,Jo",
        );
        assert!(result.is_err());
    }
}
