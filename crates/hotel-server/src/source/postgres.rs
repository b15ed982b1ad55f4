//! Postgres-backed dataset source
//!
//! Every dataset lives in the `bookings` table under its own `dataset` name,
//! with `position` preserving the original row order. The `datasets` table
//! records which names exist, so an empty upload is still a known dataset.

use super::{DatasetRef, DatasetSource};
use crate::analytics::Dataset;
use async_trait::async_trait;
use hotel_common::{BookingRecord, Hotel, HotelError, Result};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

/// Rows inserted per statement during ingestion
const INSERT_CHUNK: usize = 5_000;

fn database_error(err: sqlx::Error) -> HotelError {
    HotelError::Database(err.to_string())
}

fn non_negative(column: &'static str, value: i32) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| HotelError::SchemaMismatch(format!("negative value {} in column {}", value, column)))
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    hotel: String,
    is_canceled: bool,
    is_repeated_guest: bool,
    lead_time: i32,
    arrival_date_day_of_month: i32,
    arrival_date_month: String,
    arrival_date_year: i32,
    arrival_date_week_number: i32,
    stays_in_week_nights: i32,
    stays_in_weekend_nights: i32,
    adr: f64,
    adults: i32,
    children: Option<i32>,
    babies: i32,
    country: Option<String>,
    meal: String,
    name: String,
    market_segment: String,
    customer_type: String,
    reservation_status: String,
    previous_cancellations: i32,
    previous_bookings_not_canceled: i32,
    booking_changes: i32,
    agent: Option<i32>,
    company: Option<i32>,
    days_in_waiting_list: i32,
    required_car_parking_spaces: i32,
    total_of_special_requests: i32,
}

impl TryFrom<BookingRow> for BookingRecord {
    type Error = HotelError;

    fn try_from(row: BookingRow) -> Result<Self> {
        Ok(BookingRecord {
            hotel: row.hotel.parse::<Hotel>()?,
            is_canceled: row.is_canceled,
            is_repeated_guest: row.is_repeated_guest,
            lead_time: non_negative("lead_time", row.lead_time)?,
            arrival_day: non_negative("arrival_date_day_of_month", row.arrival_date_day_of_month)?,
            arrival_month: row.arrival_date_month,
            arrival_year: row.arrival_date_year,
            arrival_week_number: non_negative("arrival_date_week_number", row.arrival_date_week_number)?,
            stays_week_nights: non_negative("stays_in_week_nights", row.stays_in_week_nights)?,
            stays_weekend_nights: non_negative("stays_in_weekend_nights", row.stays_in_weekend_nights)?,
            adr: row.adr,
            adults: non_negative("adults", row.adults)?,
            children: row.children.map(|c| non_negative("children", c)).transpose()?,
            babies: non_negative("babies", row.babies)?,
            country: row.country,
            meal: row.meal,
            name: row.name,
            market_segment: row.market_segment,
            customer_type: row.customer_type,
            reservation_status: row.reservation_status,
            previous_cancellations: non_negative("previous_cancellations", row.previous_cancellations)?,
            previous_bookings_not_canceled: non_negative(
                "previous_bookings_not_canceled",
                row.previous_bookings_not_canceled,
            )?,
            booking_changes: non_negative("booking_changes", row.booking_changes)?,
            agent: row.agent.map(|a| non_negative("agent", a)).transpose()?,
            company: row.company.map(|c| non_negative("company", c)).transpose()?,
            days_in_waiting_list: non_negative("days_in_waiting_list", row.days_in_waiting_list)?,
            required_car_parking_spaces: non_negative(
                "required_car_parking_spaces",
                row.required_car_parking_spaces,
            )?,
            total_of_special_requests: non_negative(
                "total_of_special_requests",
                row.total_of_special_requests,
            )?,
        })
    }
}

fn to_i32(column: &'static str, value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| HotelError::InvalidArgument(format!("value {} in column {} is too large", value, column)))
}

/// Column-major copy of a chunk of records, bound as Postgres arrays
#[derive(Default)]
struct Columns {
    position: Vec<i32>,
    hotel: Vec<String>,
    is_canceled: Vec<bool>,
    is_repeated_guest: Vec<bool>,
    lead_time: Vec<i32>,
    day: Vec<i32>,
    month: Vec<String>,
    year: Vec<i32>,
    week: Vec<i32>,
    week_nights: Vec<i32>,
    weekend_nights: Vec<i32>,
    adr: Vec<f64>,
    adults: Vec<i32>,
    children: Vec<Option<i32>>,
    babies: Vec<i32>,
    country: Vec<Option<String>>,
    meal: Vec<String>,
    name: Vec<String>,
    market_segment: Vec<String>,
    customer_type: Vec<String>,
    reservation_status: Vec<String>,
    previous_cancellations: Vec<i32>,
    previous_not_canceled: Vec<i32>,
    booking_changes: Vec<i32>,
    agent: Vec<Option<i32>>,
    company: Vec<Option<i32>>,
    waiting_days: Vec<i32>,
    parking: Vec<i32>,
    special_requests: Vec<i32>,
}

impl Columns {
    fn push(&mut self, position: usize, r: &BookingRecord) -> Result<()> {
        self.position.push(
            i32::try_from(position)
                .map_err(|_| HotelError::InvalidArgument("dataset has too many rows".to_string()))?,
        );
        self.hotel.push(r.hotel.label().to_string());
        self.is_canceled.push(r.is_canceled);
        self.is_repeated_guest.push(r.is_repeated_guest);
        self.lead_time.push(to_i32("lead_time", r.lead_time)?);
        self.day.push(to_i32("arrival_date_day_of_month", r.arrival_day)?);
        self.month.push(r.arrival_month.clone());
        self.year.push(r.arrival_year);
        self.week.push(to_i32("arrival_date_week_number", r.arrival_week_number)?);
        self.week_nights.push(to_i32("stays_in_week_nights", r.stays_week_nights)?);
        self.weekend_nights.push(to_i32("stays_in_weekend_nights", r.stays_weekend_nights)?);
        self.adr.push(r.adr);
        self.adults.push(to_i32("adults", r.adults)?);
        self.children.push(r.children.map(|c| to_i32("children", c)).transpose()?);
        self.babies.push(to_i32("babies", r.babies)?);
        self.country.push(r.country.clone());
        self.meal.push(r.meal.clone());
        self.name.push(r.name.clone());
        self.market_segment.push(r.market_segment.clone());
        self.customer_type.push(r.customer_type.clone());
        self.reservation_status.push(r.reservation_status.clone());
        self.previous_cancellations
            .push(to_i32("previous_cancellations", r.previous_cancellations)?);
        self.previous_not_canceled.push(to_i32(
            "previous_bookings_not_canceled",
            r.previous_bookings_not_canceled,
        )?);
        self.booking_changes.push(to_i32("booking_changes", r.booking_changes)?);
        self.agent.push(r.agent.map(|a| to_i32("agent", a)).transpose()?);
        self.company.push(r.company.map(|c| to_i32("company", c)).transpose()?);
        self.waiting_days.push(to_i32("days_in_waiting_list", r.days_in_waiting_list)?);
        self.parking
            .push(to_i32("required_car_parking_spaces", r.required_car_parking_spaces)?);
        self.special_requests
            .push(to_i32("total_of_special_requests", r.total_of_special_requests)?);
        Ok(())
    }
}

/// Loads datasets from the `bookings` table
#[derive(Debug, Clone)]
pub struct PgTableSource {
    pool: PgPool,
    default_dataset: Option<String>,
}

impl PgTableSource {
    pub fn new(pool: PgPool, default_dataset: Option<String>) -> Self {
        Self {
            pool,
            default_dataset,
        }
    }

    fn resolve<'a>(&'a self, dataset: &'a DatasetRef) -> Result<&'a str> {
        match dataset {
            DatasetRef::Named(name) => Ok(name),
            DatasetRef::Default => self.default_dataset.as_deref().ok_or_else(|| {
                HotelError::SourceUnavailable("no dataset selected and no default dataset configured".to_string())
            }),
        }
    }

    async fn dataset_exists(&self, name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM datasets WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(exists)
    }
}

#[async_trait]
impl DatasetSource for PgTableSource {
    #[instrument(skip(self), fields(dataset = %dataset))]
    async fn load(&self, dataset: &DatasetRef) -> Result<Dataset> {
        let name = self.resolve(dataset)?;

        if !self.dataset_exists(name).await? {
            return Err(HotelError::SourceUnavailable(format!(
                "dataset '{}' is not in the database",
                name
            )));
        }

        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT hotel, is_canceled, is_repeated_guest, lead_time,
                   arrival_date_day_of_month, arrival_date_month, arrival_date_year,
                   arrival_date_week_number, stays_in_week_nights, stays_in_weekend_nights,
                   adr, adults, children, babies, country, meal, name,
                   market_segment, customer_type, reservation_status,
                   previous_cancellations, previous_bookings_not_canceled, booking_changes,
                   agent, company,
                   days_in_waiting_list, required_car_parking_spaces, total_of_special_requests
            FROM bookings
            WHERE dataset = $1
            ORDER BY position
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let records = rows
            .into_iter()
            .map(BookingRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        info!(records = records.len(), "Dataset loaded from database");
        Ok(Dataset::new(records))
    }

    #[instrument(skip(self, dataset), fields(records = dataset.len()))]
    async fn ingest(&self, name: &str, dataset: &Dataset) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query("DELETE FROM bookings WHERE dataset = $1")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO datasets (name, record_count)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE
            SET record_count = EXCLUDED.record_count, updated_at = NOW()
            "#,
        )
        .bind(name)
        .bind(i64::try_from(dataset.len()).unwrap_or(i64::MAX))
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        for (chunk_index, chunk) in dataset.records().chunks(INSERT_CHUNK).enumerate() {
            let mut columns = Columns::default();
            for (offset, record) in chunk.iter().enumerate() {
                columns.push(chunk_index * INSERT_CHUNK + offset, record)?;
            }

            sqlx::query(
                r#"
                INSERT INTO bookings (
                    dataset, position, hotel, is_canceled, is_repeated_guest, lead_time,
                    arrival_date_day_of_month, arrival_date_month, arrival_date_year,
                    arrival_date_week_number, stays_in_week_nights, stays_in_weekend_nights,
                    adr, adults, children, babies, country, meal, name,
                    market_segment, customer_type, reservation_status,
                    previous_cancellations, previous_bookings_not_canceled, booking_changes,
                    agent, company,
                    days_in_waiting_list, required_car_parking_spaces, total_of_special_requests
                )
                SELECT $1, * FROM UNNEST(
                    $2::int4[], $3::text[], $4::bool[], $5::bool[], $6::int4[],
                    $7::int4[], $8::text[], $9::int4[],
                    $10::int4[], $11::int4[], $12::int4[],
                    $13::float8[], $14::int4[], $15::int4[], $16::int4[], $17::text[], $18::text[], $19::text[],
                    $20::text[], $21::text[], $22::text[],
                    $23::int4[], $24::int4[], $25::int4[],
                    $26::int4[], $27::int4[],
                    $28::int4[], $29::int4[], $30::int4[]
                )
                "#,
            )
            .bind(name)
            .bind(&columns.position)
            .bind(&columns.hotel)
            .bind(&columns.is_canceled)
            .bind(&columns.is_repeated_guest)
            .bind(&columns.lead_time)
            .bind(&columns.day)
            .bind(&columns.month)
            .bind(&columns.year)
            .bind(&columns.week)
            .bind(&columns.week_nights)
            .bind(&columns.weekend_nights)
            .bind(&columns.adr)
            .bind(&columns.adults)
            .bind(&columns.children)
            .bind(&columns.babies)
            .bind(&columns.country)
            .bind(&columns.meal)
            .bind(&columns.name)
            .bind(&columns.market_segment)
            .bind(&columns.customer_type)
            .bind(&columns.reservation_status)
            .bind(&columns.previous_cancellations)
            .bind(&columns.previous_not_canceled)
            .bind(&columns.booking_changes)
            .bind(&columns.agent)
            .bind(&columns.company)
            .bind(&columns.waiting_days)
            .bind(&columns.parking)
            .bind(&columns.special_requests)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

            debug!(chunk = chunk_index, rows = chunk.len(), "Inserted booking chunk");
        }

        tx.commit().await.map_err(database_error)?;
        info!(dataset = %name, records = dataset.len(), "Dataset ingested");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn forget(&self, name: &str) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query("DELETE FROM bookings WHERE dataset = $1")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        sqlx::query("DELETE FROM datasets WHERE name = $1")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;
        info!(dataset = %name, "Dataset removed from database");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
