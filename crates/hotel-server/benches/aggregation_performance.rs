/// Performance benchmarks for the aggregation menu
///
/// These benchmarks run every aggregation against generated datasets of
/// increasing size, plus CSV parsing of the same records.
///
/// Run with: cargo bench --bench aggregation_performance
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hotel_common::types::fixtures::{csv_document, BookingBuilder};
use hotel_common::BookingRecord;
use std::time::Duration;

use hotel_server::analytics::{Aggregation, Dataset, TrendBasis};
use hotel_server::source::file::parse_csv;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const COUNTRIES: [&str; 6] = ["PRT", "GBR", "FRA", "ESP", "DEU", "USA"];
const MEALS: [&str; 4] = ["BB", "HB", "FB", "SC"];

/// Deterministic spread of hotels, dates, countries and prices
fn generate_records(count: usize) -> Vec<BookingRecord> {
    (0..count)
        .map(|i| {
            let builder = BookingBuilder::new()
                .arrival(
                    (i % 28) as u32 + 1,
                    MONTHS[i % MONTHS.len()],
                    2015 + (i % 3) as i32,
                )
                .lead_time((i * 7 % 365) as u32)
                .nights((i % 5) as u32, (i % 3) as u32)
                .adr(50.0 + (i % 200) as f64)
                .guests(1 + (i % 3) as u32, Some((i % 2) as u32), 0)
                .country(Some(COUNTRIES[i % COUNTRIES.len()]))
                .meal(MEALS[i % MEALS.len()])
                .canceled(i % 4 == 0)
                .repeated_guest(i % 10 == 0);

            if i % 2 == 0 {
                builder.resort().build()
            } else {
                builder.build()
            }
        })
        .collect()
}

fn all_aggregations() -> Vec<Aggregation> {
    vec![
        Aggregation::PopularMealPackage,
        Aggregation::AvgLengthOfStay,
        Aggregation::TotalRevenueByMonthHotel,
        Aggregation::TopCountries,
        Aggregation::RepeatedGuestsPercentage,
        Aggregation::TotalGuestsByYear,
        Aggregation::AvgDailyRateByMonthResort,
        Aggregation::MostCommonArrivalWeekdayCity,
        Aggregation::CountByHotelMeal,
        Aggregation::TotalRevenueResortByCountry,
        Aggregation::CountByHotelRepeatedGuest,
        Aggregation::RevenueTrend {
            basis: TrendBasis::Booking,
            include_canceled: false,
        },
        Aggregation::RevenueTrend {
            basis: TrendBasis::Arrival,
            include_canceled: true,
        },
        Aggregation::DescriptiveStats,
    ]
}

/// Benchmark each aggregation at several dataset sizes
fn bench_aggregations(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregations");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_000usize, 10_000, 100_000] {
        let dataset = Dataset::new(generate_records(size));
        group.throughput(Throughput::Elements(size as u64));

        for aggregation in all_aggregations() {
            let id = match aggregation {
                Aggregation::RevenueTrend { basis, .. } => {
                    format!("{}_{:?}", aggregation.name(), basis)
                },
                _ => aggregation.name().to_string(),
            };

            group.bench_with_input(BenchmarkId::new(id, size), &dataset, |b, dataset| {
                b.iter(|| aggregation.run(black_box(dataset)))
            });
        }
    }

    group.finish();
}

/// Benchmark CSV parsing at several dataset sizes
fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_000usize, 10_000] {
        let document = csv_document(&generate_records(size));
        group.throughput(Throughput::Bytes(document.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, document| {
            b.iter(|| parse_csv(black_box(document.as_bytes())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregations, bench_parse_csv);
criterion_main!(benches);
