use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Photo, TravelSnapshot, Trip},
    services::store::TravelDataStore,
};

/// Creates a PostgreSQL connection pool
///
/// The pool is only ever used for reads of the trip and photo tables.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

#[derive(Debug, FromRow)]
struct TripRow {
    id: Uuid,
    location: Option<String>,
    city: Option<String>,
    country: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip {
            id: row.id,
            location: row.location.unwrap_or_default(),
            city: row.city,
            country: row.country,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(Debug, FromRow)]
struct PhotoRow {
    id: Uuid,
    latitude: Option<f64>,
    longitude: Option<f64>,
    location_label: Option<String>,
    captured_at: Option<DateTime<Utc>>,
    uploaded_at: DateTime<Utc>,
    url: Option<String>,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Photo {
            id: row.id,
            latitude: row.latitude,
            longitude: row.longitude,
            location_label: row.location_label,
            captured_at: row.captured_at,
            uploaded_at: row.uploaded_at,
            url: row.url.unwrap_or_default(),
        }
    }
}

/// Reads trips and photos from the tables owned by the persistence service
pub struct PgTravelStore {
    pool: PgPool,
}

impl PgTravelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TravelDataStore for PgTravelStore {
    async fn load_snapshot(&self) -> AppResult<TravelSnapshot> {
        let trips = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, location, city, country, start_date, end_date
            FROM trips
            "#,
        )
        .fetch_all(&self.pool);

        let photos = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, latitude, longitude, location_label, captured_at, uploaded_at, url
            FROM photos
            "#,
        )
        .fetch_all(&self.pool);

        let (trips, photos) = tokio::try_join!(trips, photos)?;

        tracing::debug!(
            trips = trips.len(),
            photos = photos.len(),
            "Loaded travel snapshot from Postgres"
        );

        Ok(TravelSnapshot {
            trips: trips.into_iter().map(Trip::from).collect(),
            photos: photos.into_iter().map(Photo::from).collect(),
        })
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
