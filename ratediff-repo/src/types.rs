//! Database row structs for SQLite and PostgreSQL.

use sqlx::FromRow;

use ratediff_types::ExchangeRateRecord;
#[cfg(feature = "sqlite")]
use ratediff_types::RepoError;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

/// Exchange rate row from PostgreSQL (`SERIAL` id, native `TIMESTAMP`).
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgRateRow {
    pub id: i32,
    pub currency: String,
    pub rate1: f64,
    pub rate2: f64,
    pub diff: f64,
    pub timestamp: chrono::NaiveDateTime,
}

#[cfg(feature = "postgres")]
impl PgRateRow {
    pub fn into_domain(self) -> ExchangeRateRecord {
        ExchangeRateRecord {
            id: i64::from(self.id),
            currency: self.currency,
            rate1: self.rate1,
            rate2: self.rate2,
            diff: self.diff,
            timestamp: self.timestamp,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows
// ─────────────────────────────────────────────────────────────────────────────

/// Format written by the SQLite column default.
#[cfg(feature = "sqlite")]
pub const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Exchange rate row from SQLite (timestamp stored as TEXT).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteRateRow {
    pub id: i64,
    pub currency: String,
    pub rate1: f64,
    pub rate2: f64,
    pub diff: f64,
    pub timestamp: String,
}

#[cfg(feature = "sqlite")]
impl SqliteRateRow {
    pub fn into_domain(self) -> Result<ExchangeRateRecord, RepoError> {
        let timestamp =
            chrono::NaiveDateTime::parse_from_str(&self.timestamp, SQLITE_TIMESTAMP_FORMAT)
                .map_err(|e| {
                    RepoError::CorruptRow(format!(
                        "row {} has invalid timestamp {:?}: {}",
                        self.id, self.timestamp, e
                    ))
                })?;

        Ok(ExchangeRateRecord {
            id: self.id,
            currency: self.currency,
            rate1: self.rate1,
            rate2: self.rate2,
            diff: self.diff,
            timestamp,
        })
    }
}
