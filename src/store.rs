use crate::models::{CounterSample, DailyAggregate};
use crate::stats::aggregate;
use rusqlite::params;
use tokio_rusqlite::Connection;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS counters (
    ts TEXT PRIMARY KEY,
    views INTEGER NOT NULL,
    likes INTEGER NOT NULL,
    comments INTEGER NOT NULL
)";

/// Durable counter store: one row per poll, keyed by capture timestamp.
///
/// Opened once at startup and cloned into handlers; the connection serialises
/// access internally, which is all the interaction model needs (one writer,
/// one reader per render).
#[derive(Clone)]
pub struct Store {
    conn: Connection,
}

impl Store {
    pub async fn open(path: &std::path::Path) -> Result<Self, tokio_rusqlite::Error> {
        let conn = Connection::open(path).await?;
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self, tokio_rusqlite::Error> {
        let conn = Connection::open_in_memory().await?;
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Persists one sample. A duplicate timestamp replaces the existing row
    /// (last write wins; timestamps have second precision and every poll is
    /// human-triggered, so collisions do not happen in practice).
    pub async fn append(&self, sample: CounterSample) -> Result<(), tokio_rusqlite::Error> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO counters (ts, views, likes, comments) VALUES (?1, ?2, ?3, ?4)",
                    params![sample.ts, sample.views, sample.likes, sample.comments],
                )?;
                Ok(())
            })
            .await
    }

    /// Full poll history, ordered by capture time.
    pub async fn all_samples(&self) -> Result<Vec<CounterSample>, tokio_rusqlite::Error> {
        self.conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT ts, views, likes, comments FROM counters ORDER BY ts")?;
                let samples = stmt
                    .query_map([], |row| {
                        Ok(CounterSample {
                            ts: row.get(0)?,
                            views: row.get(1)?,
                            likes: row.get(2)?,
                            comments: row.get(3)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(samples)
            })
            .await
    }

    /// Daily maxima with day-over-day deltas, recomputed from the full
    /// history on every call.
    pub async fn query_daily(&self) -> Result<Vec<DailyAggregate>, tokio_rusqlite::Error> {
        Ok(aggregate(&self.all_samples().await?))
    }
}
