use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::Transaction;

use super::MIGRATION_001_INITIAL;

/// Name of the durable slot holding the serialized transaction sequence.
const TRANSACTIONS_SLOT: &str = "transactions";

/// Repository persisting the ledger into a single key-value slot.
/// The whole record sequence is serialized as one JSON document and
/// rewritten on every mutation (last-write-wins, single writer).
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    /// Creates the database file if it doesn't exist (with `mode=rwc`).
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize the database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Load the transaction sequence from the durable slot.
    /// An absent slot or a value that fails to parse yields an empty ledger;
    /// malformed data is not surfaced as an error.
    pub async fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let row = sqlx::query("SELECT value FROM slots WHERE key = ?")
            .bind(TRANSACTIONS_SLOT)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to read transactions slot")?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let value: String = row.get("value");
        Ok(serde_json::from_str(&value).unwrap_or_default())
    }

    /// Overwrite the durable slot with the full transaction sequence.
    pub async fn save_transactions(&self, records: &[Transaction]) -> Result<()> {
        let value =
            serde_json::to_string(records).context("Failed to serialize transactions")?;

        sqlx::query(
            r#"
            INSERT INTO slots (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(TRANSACTIONS_SLOT)
        .bind(&value)
        .execute(&self.pool)
        .await
        .context("Failed to write transactions slot")?;

        Ok(())
    }
}
