//! Descriptive statistics for the numeric columns

use super::dataset::Dataset;
use super::reduce::SumAccumulator;
use hotel_common::BookingRecord;
use serde::Serialize;

/// Summary of one numeric column
///
/// Statistics that are undefined for the sample size are `None`
/// (serialized as `null`) rather than NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Summarize a column; the order of `values` does not matter
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let count = values.len();

        let mean = values.iter().copied().collect::<SumAccumulator>().mean();
        let std = match (mean, count) {
            (Some(mean), n) if n > 1 => {
                let squares: SumAccumulator = values.iter().map(|v| (v - mean).powi(2)).collect();
                Some((squares.sum() / (n - 1) as f64).sqrt())
            },
            _ => None,
        };

        Self {
            count,
            mean,
            std,
            min: values.first().copied(),
            p25: quantile(&values, 0.25),
            p50: quantile(&values, 0.5),
            p75: quantile(&values, 0.75),
            max: values.last().copied(),
        }
    }
}

/// Linear-interpolation quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

type Extractor = fn(&BookingRecord) -> Option<f64>;

/// Numeric manifest columns in alphabetical order
const NUMERIC_COLUMNS: &[(&str, Extractor)] = &[
    ("adr", |r| Some(r.adr)),
    ("adults", |r| Some(f64::from(r.adults))),
    ("agent", |r| r.agent.map(f64::from)),
    ("arrival_date_day_of_month", |r| Some(f64::from(r.arrival_day))),
    ("arrival_date_week_number", |r| Some(f64::from(r.arrival_week_number))),
    ("arrival_date_year", |r| Some(f64::from(r.arrival_year))),
    ("babies", |r| Some(f64::from(r.babies))),
    ("booking_changes", |r| Some(f64::from(r.booking_changes))),
    ("children", |r| r.children.map(f64::from)),
    ("company", |r| r.company.map(f64::from)),
    ("days_in_waiting_list", |r| Some(f64::from(r.days_in_waiting_list))),
    ("is_canceled", |r| Some(if r.is_canceled { 1.0 } else { 0.0 })),
    ("is_repeated_guest", |r| Some(if r.is_repeated_guest { 1.0 } else { 0.0 })),
    ("lead_time", |r| Some(f64::from(r.lead_time))),
    ("previous_bookings_not_canceled", |r| Some(f64::from(r.previous_bookings_not_canceled))),
    ("previous_cancellations", |r| Some(f64::from(r.previous_cancellations))),
    ("required_car_parking_spaces", |r| Some(f64::from(r.required_car_parking_spaces))),
    ("stays_in_week_nights", |r| Some(f64::from(r.stays_week_nights))),
    ("stays_in_weekend_nights", |r| Some(f64::from(r.stays_weekend_nights))),
    ("total_of_special_requests", |r| Some(f64::from(r.total_of_special_requests))),
];

/// Summaries of every numeric column, keyed by column name
pub fn descriptive_stats(dataset: &Dataset) -> Vec<(&'static str, ColumnSummary)> {
    NUMERIC_COLUMNS
        .iter()
        .map(|(name, extract)| {
            let values = dataset.iter().filter_map(|r| extract(r)).collect();
            (*name, ColumnSummary::from_values(values))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_common::types::fixtures::BookingBuilder;

    #[test]
    fn test_known_values() {
        let summary = ColumnSummary::from_values(vec![3.0, 1.0, 5.0, 2.0, 4.0]);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, Some(3.0));
        assert!((summary.std.unwrap() - 1.581_138_830_084_19).abs() < 1e-9);
        assert_eq!(summary.min, Some(1.0));
        assert_eq!(summary.p25, Some(2.0));
        assert_eq!(summary.p50, Some(3.0));
        assert_eq!(summary.p75, Some(4.0));
        assert_eq!(summary.max, Some(5.0));
    }

    #[test]
    fn test_interpolated_quartiles() {
        let summary = ColumnSummary::from_values(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(summary.p25, Some(1.75));
        assert_eq!(summary.p50, Some(2.5));
        assert_eq!(summary.p75, Some(3.25));
    }

    #[test]
    fn test_single_value_has_no_std() {
        let summary = ColumnSummary::from_values(vec![7.0]);
        assert_eq!(summary.std, None);
        assert_eq!(summary.p75, Some(7.0));
    }

    #[test]
    fn test_empty_column() {
        let summary = ColumnSummary::from_values(Vec::new());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.min, None);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["25%"].is_null());
    }

    #[test]
    fn test_children_skips_missing() {
        let dataset: Dataset = vec![
            BookingBuilder::new().guests(2, Some(2), 0).build(),
            BookingBuilder::new().guests(2, None, 0).build(),
        ]
        .into();

        let stats = descriptive_stats(&dataset);
        let (_, children) = stats.iter().find(|(name, _)| *name == "children").unwrap();
        assert_eq!(children.count, 1);
        let (_, adults) = stats.iter().find(|(name, _)| *name == "adults").unwrap();
        assert_eq!(adults.count, 2);
    }

    #[test]
    fn test_agent_and_company_skip_nulls() {
        let dataset: Dataset = vec![
            BookingBuilder::new().agent(Some(9)).company(None).build(),
            BookingBuilder::new().agent(None).company(Some(40)).build(),
            BookingBuilder::new().agent(Some(11)).company(None).build(),
        ]
        .into();

        let stats = descriptive_stats(&dataset);
        let (_, agent) = stats.iter().find(|(name, _)| *name == "agent").unwrap();
        assert_eq!(agent.count, 2);
        assert_eq!(agent.mean, Some(10.0));
        let (_, company) = stats.iter().find(|(name, _)| *name == "company").unwrap();
        assert_eq!(company.count, 1);
        assert_eq!(company.max, Some(40.0));
        assert_eq!(stats.len(), 20);
    }

    #[test]
    fn test_columns_sorted() {
        let names: Vec<_> = NUMERIC_COLUMNS.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
