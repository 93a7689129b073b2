//! PostgreSQL implementation of ResourceStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use stratus_core::ports::ResourceStore;
use stratus_core::resource::ResourceRecord;
use stratus_core::{Error, Result};

/// PostgreSQL implementation of ResourceStore.
#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn list(&self) -> Result<Vec<ResourceRecord>> {
        let rows = sqlx::query(
            "SELECT id, resource_type, tags, data, last_updated FROM aws_resources ORDER BY resource_type, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| ResourceRecord {
                id: r.get("id"),
                resource_type: r.get("resource_type"),
                tags: r.get("tags"),
                data: r.get("data"),
                last_updated: r.get("last_updated"),
            })
            .collect())
    }

    async fn newest_update(&self) -> Result<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT MAX(last_updated) AS newest FROM aws_resources")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get::<Option<DateTime<Utc>>, _>("newest"))
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM aws_resources")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    async fn insert_many(&self, records: &[ResourceRecord]) -> Result<()> {
        // One transaction for the inserts only. The preceding delete_all runs
        // separately, so a concurrent reader can observe an empty table
        // between the two; that window is a property of the bulk-refresh
        // design, not of this implementation.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        for record in records {
            sqlx::query(
                "INSERT INTO aws_resources (id, resource_type, tags, data, last_updated)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (id) DO UPDATE SET
                     resource_type = EXCLUDED.resource_type,
                     tags = EXCLUDED.tags,
                     data = EXCLUDED.data,
                     last_updated = EXCLUDED.last_updated",
            )
            .bind(&record.id)
            .bind(&record.resource_type)
            .bind(&record.tags)
            .bind(&record.data)
            .bind(record.last_updated)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }
}
