//! Column manifest every dataset must match

use hotel_common::{HotelError, Result};

/// Sorted column names of the bookings dataset
pub const COLUMNS: [&str; 36] = [
    "adr",
    "adults",
    "agent",
    "arrival_date_day_of_month",
    "arrival_date_month",
    "arrival_date_week_number",
    "arrival_date_year",
    "assigned_room_type",
    "babies",
    "booking_changes",
    "children",
    "company",
    "country",
    "credit_card",
    "customer_type",
    "days_in_waiting_list",
    "deposit_type",
    "distribution_channel",
    "email",
    "hotel",
    "is_canceled",
    "is_repeated_guest",
    "lead_time",
    "market_segment",
    "meal",
    "name",
    "phone-number",
    "previous_bookings_not_canceled",
    "previous_cancellations",
    "required_car_parking_spaces",
    "reservation_status",
    "reservation_status_date",
    "reserved_room_type",
    "stays_in_week_nights",
    "stays_in_weekend_nights",
    "total_of_special_requests",
];

/// Check that a header has exactly the manifest's columns, in any order
///
/// Surrounding whitespace on each name is ignored.
pub fn validate_header<'a, I>(header: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut columns: Vec<&str> = header.into_iter().map(str::trim).collect();
    columns.sort_unstable();

    if columns == COLUMNS {
        return Ok(());
    }

    let missing: Vec<&str> = COLUMNS
        .iter()
        .copied()
        .filter(|expected| columns.binary_search(expected).is_err())
        .collect();
    let unexpected: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|found| COLUMNS.binary_search(found).is_err())
        .collect();

    Err(HotelError::SchemaMismatch(format!(
        "expected {} columns, found {}; missing [{}], unexpected [{}]",
        COLUMNS.len(),
        columns.len(),
        missing.join(", "),
        unexpected.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_is_sorted() {
        let mut sorted = COLUMNS;
        sorted.sort_unstable();
        assert_eq!(sorted, COLUMNS);
    }

    #[test]
    fn test_any_order_with_whitespace() {
        let mut header: Vec<String> = COLUMNS.iter().rev().map(|c| format!(" {} ", c)).collect();
        header.swap(0, 10);
        assert!(validate_header(header.iter().map(String::as_str)).is_ok());
    }

    #[test]
    fn test_missing_column() {
        let header = COLUMNS.iter().copied().filter(|c| *c != "meal");
        let err = validate_header(header).unwrap_err();
        match err {
            HotelError::SchemaMismatch(message) => assert!(message.contains("missing [meal]")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_column() {
        let header = COLUMNS.iter().copied().chain(std::iter::once("loyalty_tier"));
        assert!(matches!(
            validate_header(header),
            Err(HotelError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let header = COLUMNS.iter().copied().chain(std::iter::once("adr"));
        assert!(validate_header(header).is_err());
    }
}
