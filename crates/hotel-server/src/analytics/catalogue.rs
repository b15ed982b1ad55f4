//! The fixed menu of aggregations and their response shapes

use super::aggregations;
use super::dataset::Dataset;
use super::shaping::{flat, nest};
use super::stats::descriptive_stats;
use super::trend::{revenue_trend_analysis, TrendBasis};
use hotel_common::Result;
use serde_json::{json, Value};

/// One named aggregation, ready to run against a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    PopularMealPackage,
    AvgLengthOfStay,
    TotalRevenueByMonthHotel,
    TopCountries,
    RepeatedGuestsPercentage,
    TotalGuestsByYear,
    AvgDailyRateByMonthResort,
    MostCommonArrivalWeekdayCity,
    CountByHotelMeal,
    TotalRevenueResortByCountry,
    CountByHotelRepeatedGuest,
    RevenueTrend {
        basis: TrendBasis,
        include_canceled: bool,
    },
    DescriptiveStats,
}

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::PopularMealPackage => "popular_meal_package",
            Aggregation::AvgLengthOfStay => "avg_length_of_stay",
            Aggregation::TotalRevenueByMonthHotel => "total_revenue_by_month_hotel",
            Aggregation::TopCountries => "top_countries",
            Aggregation::RepeatedGuestsPercentage => "repeated_guests_percentage",
            Aggregation::TotalGuestsByYear => "total_guests_by_year",
            Aggregation::AvgDailyRateByMonthResort => "avg_daily_rate_by_month_resort",
            Aggregation::MostCommonArrivalWeekdayCity => "most_common_arrival_weekday_city",
            Aggregation::CountByHotelMeal => "count_by_hotel_meal",
            Aggregation::TotalRevenueResortByCountry => "total_revenue_resort_by_country",
            Aggregation::CountByHotelRepeatedGuest => "count_by_hotel_repeated_guest",
            Aggregation::RevenueTrend { .. } => "revenue_trend_analysis",
            Aggregation::DescriptiveStats => "descriptive_stats",
        }
    }

    /// Run the aggregation and shape its result into a response body
    pub fn run(&self, dataset: &Dataset) -> Result<Value> {
        let body = match *self {
            Aggregation::PopularMealPackage => {
                flat(aggregations::popular_meal_package(dataset))?
            },
            Aggregation::AvgLengthOfStay => flat(aggregations::avg_length_of_stay(dataset))?,
            Aggregation::TotalRevenueByMonthHotel => {
                nest(aggregations::total_revenue_by_month_hotel(dataset)?)?
            },
            Aggregation::TopCountries => {
                let top = flat(aggregations::top_countries(dataset))?;
                return Ok(json!({ "data": top }));
            },
            Aggregation::RepeatedGuestsPercentage => {
                let result = aggregations::repeated_guests_percentage(dataset)?;
                return Ok(json!({ "result": result }));
            },
            Aggregation::TotalGuestsByYear => flat(aggregations::total_guests_by_year(dataset))?,
            Aggregation::AvgDailyRateByMonthResort => {
                flat(aggregations::avg_daily_rate_by_month_resort(dataset)?)?
            },
            Aggregation::MostCommonArrivalWeekdayCity => {
                flat(aggregations::most_common_arrival_weekday_city(dataset)?)?
            },
            Aggregation::CountByHotelMeal => nest(aggregations::count_by_hotel_meal(dataset))?,
            Aggregation::TotalRevenueResortByCountry => {
                flat(aggregations::total_revenue_resort_by_country(dataset))?
            },
            Aggregation::CountByHotelRepeatedGuest => {
                nest(aggregations::count_by_hotel_repeated_guest(dataset))?
            },
            Aggregation::RevenueTrend {
                basis,
                include_canceled,
            } => {
                let trend = revenue_trend_analysis(dataset, basis, include_canceled)?;
                nest(trend.into_iter().flat_map(|(hotel, points)| {
                    points
                        .into_iter()
                        .enumerate()
                        .map(move |(idx, point)| ((hotel, idx), point))
                }))?
            },
            Aggregation::DescriptiveStats => flat(descriptive_stats(dataset))?,
        };

        Ok(Value::Object(body))
    }
}
