//! Named aggregations over a [`Dataset`]
//!
//! Every function here is pure: it reads the snapshot and returns typed,
//! ordered results. Converting them into response bodies is the job of
//! [`super::shaping`] and [`super::catalogue`].
//!
//! Grouped results use `BTreeMap` so that output key order is a function of
//! the keys alone, never of the record order.

use super::dataset::Dataset;
use super::reduce::{round2, FirstSeenCounter, SumAccumulator};
use hotel_common::dates::{weekday_name, Month};
use hotel_common::{HotelError, Hotel, Result};
use std::collections::{BTreeMap, HashMap};

/// Number of countries returned by [`top_countries`]
pub const TOP_COUNTRIES_LIMIT: usize = 5;

/// Most frequent meal category; ties go to the category seen first
pub fn popular_meal_package(dataset: &Dataset) -> Option<(String, usize)> {
    dataset
        .iter()
        .map(|record| record.meal.clone())
        .collect::<FirstSeenCounter<_>>()
        .most_common()
}

/// Revenue per hotel and booking month, rounded to cents
pub fn total_revenue_by_month_hotel(dataset: &Dataset) -> Result<BTreeMap<(Hotel, Month), f64>> {
    let mut groups: BTreeMap<(Hotel, Month), SumAccumulator> = BTreeMap::new();
    for record in dataset.iter() {
        let month = record.booking_month()?;
        groups
            .entry((record.hotel, month))
            .or_default()
            .push(record.total_revenue());
    }

    Ok(groups
        .into_iter()
        .map(|(key, acc)| (key, round2(acc.sum())))
        .collect())
}

/// The five most frequent countries, by count then code
pub fn top_countries(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for country in dataset.iter().filter_map(|record| record.country.as_deref()) {
        *counts.entry(country).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(TOP_COUNTRIES_LIMIT)
        .map(|(code, count)| (code.to_string(), count))
        .collect()
}

/// Share of repeated guests as a percentage with four decimals
///
/// # Errors
///
/// [`HotelError::EmptyDataset`] when there are no records to divide by.
pub fn repeated_guests_percentage(dataset: &Dataset) -> Result<String> {
    if dataset.is_empty() {
        return Err(HotelError::EmptyDataset("repeated_guests_percentage"));
    }

    let repeated = dataset.iter().filter(|record| record.is_repeated_guest).count();
    let percentage = repeated as f64 / dataset.len() as f64 * 100.0;
    Ok(format!("{:.4}", percentage))
}

/// Guests per arrival year
pub fn total_guests_by_year(dataset: &Dataset) -> BTreeMap<i32, u64> {
    let mut totals = BTreeMap::new();
    for record in dataset.iter() {
        *totals.entry(record.arrival_year).or_insert(0) += record.total_guests();
    }
    totals
}

/// Mean ADR of resort bookings per booking month, highest first
pub fn avg_daily_rate_by_month_resort(dataset: &Dataset) -> Result<Vec<(Month, f64)>> {
    let mut groups: BTreeMap<Month, SumAccumulator> = BTreeMap::new();
    for record in dataset.for_hotel(Hotel::ResortHotel) {
        groups.entry(record.booking_month()?).or_default().push(record.adr);
    }

    let mut averages: Vec<(Month, f64)> = groups
        .into_iter()
        .filter_map(|(month, acc)| acc.mean().map(|mean| (month, round2(mean))))
        .collect();
    // BTreeMap iteration already yields months ascending, stable sort keeps that on ties
    averages.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(averages)
}

/// Most frequent arrival weekday among city hotel bookings
pub fn most_common_arrival_weekday_city(dataset: &Dataset) -> Result<Option<(String, usize)>> {
    let mut counter = FirstSeenCounter::default();
    for record in dataset.for_hotel(Hotel::CityHotel) {
        counter.add(weekday_name(record.arrival_date()?));
    }
    Ok(counter.most_common())
}

pub fn count_by_hotel_meal(dataset: &Dataset) -> BTreeMap<(Hotel, String), usize> {
    let mut counts = BTreeMap::new();
    for record in dataset.iter() {
        *counts.entry((record.hotel, record.meal.clone())).or_insert(0) += 1;
    }
    counts
}

/// Revenue of resort bookings per country; bookings without a country are left out
pub fn total_revenue_resort_by_country(dataset: &Dataset) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<String, SumAccumulator> = BTreeMap::new();
    for record in dataset.for_hotel(Hotel::ResortHotel) {
        if let Some(country) = &record.country {
            groups
                .entry(country.clone())
                .or_default()
                .push(record.total_revenue());
        }
    }

    groups.into_iter().map(|(country, acc)| (country, acc.sum())).collect()
}

pub fn count_by_hotel_repeated_guest(dataset: &Dataset) -> BTreeMap<(Hotel, bool), usize> {
    let mut counts = BTreeMap::new();
    for record in dataset.iter() {
        *counts.entry((record.hotel, record.is_repeated_guest)).or_insert(0) += 1;
    }
    counts
}

/// Mean number of nights per hotel
pub fn avg_length_of_stay(dataset: &Dataset) -> BTreeMap<Hotel, f64> {
    let mut groups: BTreeMap<Hotel, SumAccumulator> = BTreeMap::new();
    for record in dataset.iter() {
        groups
            .entry(record.hotel)
            .or_default()
            .push(record.total_stay() as f64);
    }

    groups
        .into_iter()
        .filter_map(|(hotel, acc)| acc.mean().map(|mean| (hotel, round2(mean))))
        .collect()
}
