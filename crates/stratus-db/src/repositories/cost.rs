//! PostgreSQL implementation of CostStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use stratus_core::cost::CostRecord;
use stratus_core::ports::CostStore;
use stratus_core::{Error, Result};

/// PostgreSQL implementation of CostStore.
#[derive(Clone)]
pub struct PgCostStore {
    pool: PgPool,
}

impl PgCostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CostStore for PgCostStore {
    async fn get(&self, id: &str) -> Result<Option<CostRecord>> {
        let row = sqlx::query(
            "SELECT id, start_date, end_date, data, last_updated FROM aws_costs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(|r| CostRecord {
            id: r.get("id"),
            start_date: r.get("start_date"),
            end_date: r.get("end_date"),
            data: r.get("data"),
            last_updated: r.get("last_updated"),
        }))
    }

    async fn upsert(&self, record: &CostRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO aws_costs (id, start_date, end_date, data, last_updated)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                 data = EXCLUDED.data,
                 last_updated = EXCLUDED.last_updated",
        )
        .bind(&record.id)
        .bind(&record.start_date)
        .bind(&record.end_date)
        .bind(&record.data)
        .bind(record.last_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }
}
