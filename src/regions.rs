//! Region Store
//!
//! Read-only lookups against the `regions` table of an embedded SQLite
//! database. One parameterized range-containment statement; the service never
//! writes to this database.

use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};

/// A region whose environmental envelope contains the queried conditions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegionMatch {
    #[sqlx(rename = "region_name")]
    pub region: String,
    #[sqlx(rename = "suggested_crops")]
    pub crops: String,
}

#[derive(Clone)]
pub struct RegionStore {
    pool: SqlitePool,
}

impl RegionStore {
    /// Wrap an existing pool. Used by tests with an in-memory database.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database file behind a small connection pool.
    pub async fn connect(path: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite://{}", path))
            .await?;
        Ok(Self::new(pool))
    }

    /// All regions whose bounds contain the supplied measurements.
    pub async fn find_matching(
        &self,
        temperature: f64,
        soil_ph: f64,
        rainfall: f64,
    ) -> Result<Vec<RegionMatch>, sqlx::Error> {
        sqlx::query_as::<_, RegionMatch>(
            r#"
            SELECT region_name, suggested_crops
            FROM regions
            WHERE ? BETWEEN temperature_min AND temperature_max
              AND ? BETWEEN soil_ph_min AND soil_ph_max
              AND ? BETWEEN rainfall_min AND rainfall_max
            "#,
        )
        .bind(temperature)
        .bind(soil_ph)
        .bind(rainfall)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> RegionStore {
        // In-memory SQLite: a single connection, or each one sees its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");

        sqlx::query(
            "CREATE TABLE regions (
                region_name TEXT NOT NULL,
                suggested_crops TEXT NOT NULL,
                temperature_min REAL NOT NULL,
                temperature_max REAL NOT NULL,
                soil_ph_min REAL NOT NULL,
                soil_ph_max REAL NOT NULL,
                rainfall_min REAL NOT NULL,
                rainfall_max REAL NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .expect("create table");

        for row in [
            ("Punjab", "wheat, rice", 15.0, 30.0, 5.5, 7.5, 300.0, 900.0),
            ("Mekong Delta", "rice", 22.0, 32.0, 5.0, 6.5, 1200.0, 2200.0),
        ] {
            sqlx::query("INSERT INTO regions VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
                .bind(row.0)
                .bind(row.1)
                .bind(row.2)
                .bind(row.3)
                .bind(row.4)
                .bind(row.5)
                .bind(row.6)
                .bind(row.7)
                .execute(&pool)
                .await
                .expect("insert row");
        }

        RegionStore::new(pool)
    }

    #[tokio::test]
    async fn finds_regions_containing_conditions() {
        let store = seeded_store().await;
        let matches = store.find_matching(20.0, 6.5, 400.0).await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].region, "Punjab");
        assert_eq!(matches[0].crops, "wheat, rice");
    }

    #[tokio::test]
    async fn bounds_are_inclusive() {
        let store = seeded_store().await;
        let matches = store.find_matching(15.0, 5.5, 300.0).await.unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[tokio::test]
    async fn no_match_returns_empty_vec() {
        let store = seeded_store().await;
        let matches = store.find_matching(-5.0, 9.0, 10.0).await.unwrap();
        assert!(matches.is_empty());
    }
}
