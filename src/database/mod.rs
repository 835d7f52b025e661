pub mod models;
pub mod schema;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

use models::{Action, EventRecord, InsertOutcome};

/// Store client for webhook-derived event records.
///
/// Constructed once at startup and shared with the handlers; the pool is
/// reference counted so clones are cheap.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::with_max_connections(database_url, 5).await
    }

    pub async fn with_max_connections(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Database { pool })
    }

    /// Single-connection in-memory database with the schema applied.
    pub async fn new_in_memory() -> Result<Self, sqlx::Error> {
        // Every SQLite memory connection is a separate database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let database = Database { pool };
        database.run_migrations().await?;
        Ok(database)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(schema::ACTIONS_SCHEMA)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn event_exists(&self, request_id: &str, action: Action) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM actions WHERE request_id = ?1 AND action = ?2
            ) AS found
            "#,
        )
        .bind(request_id)
        .bind(action.as_str())
        .fetch_one(&self.pool)
        .await?;

        let found: i64 = row.try_get("found")?;
        Ok(found != 0)
    }

    /// Append a record. A record whose identity is already stored is left
    /// untouched and reported as a duplicate.
    pub async fn insert_event(&self, record: &EventRecord) -> Result<InsertOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO actions (request_id, author, action, to_branch, from_branch, timestamp, received_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (request_id, action) DO NOTHING
            "#,
        )
        .bind(&record.request_id)
        .bind(&record.author)
        .bind(record.action.as_str())
        .bind(&record.to_branch)
        .bind(&record.from_branch)
        .bind(&record.timestamp)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(
                "Insert of {} {} skipped, identity already stored",
                record.action, record.request_id
            );
            return Ok(InsertOutcome::Duplicate);
        }

        info!("Stored {} event {}", record.action, record.request_id);
        Ok(InsertOutcome::Inserted)
    }

    /// All stored records, most recently inserted first.
    pub async fn list_events(&self) -> Result<Vec<EventRecord>, sqlx::Error> {
        sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT request_id, author, action, to_branch, from_branch, timestamp
            FROM actions
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_events(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM actions")
            .fetch_one(&self.pool)
            .await?;

        row.try_get("total")
    }
}
