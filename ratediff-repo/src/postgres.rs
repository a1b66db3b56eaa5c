//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use ratediff_types::{ExchangeRateRecord, NewExchangeRate, RateRepository, RepoError};

use crate::types::PgRateRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_exchange_rates_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::info!("PostgreSQL schema ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for PostgresRepo {
    async fn insert_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRateRecord, RepoError> {
        let row: PgRateRow = sqlx::query_as(
            r#"INSERT INTO exchange_rates (currency, rate1, rate2, diff) VALUES ($1, $2, $3, $4)
               RETURNING id, currency, rate1, rate2, diff, "timestamp""#,
        )
        .bind(&rate.currency)
        .bind(rate.rate1)
        .bind(rate.rate2)
        .bind(rate.diff)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.into_domain())
    }

    async fn recent_rates(&self, limit: i64) -> Result<Vec<ExchangeRateRecord>, RepoError> {
        let rows: Vec<PgRateRow> = sqlx::query_as(
            r#"SELECT id, currency, rate1, rate2, diff, "timestamp" FROM exchange_rates
               ORDER BY "timestamp" DESC, id DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PgRateRow::into_domain).collect())
    }
}
