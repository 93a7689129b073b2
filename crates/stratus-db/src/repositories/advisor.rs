//! PostgreSQL implementation of AdvisorStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use stratus_core::advisor::{AdvisorRecord, CheckKind, CheckMap};
use stratus_core::ports::AdvisorStore;
use stratus_core::{Error, Result};

/// PostgreSQL implementation of AdvisorStore. The row id doubles as the
/// check-type discriminator, so there is exactly one row per kind.
#[derive(Clone)]
pub struct PgAdvisorStore {
    pool: PgPool,
}

impl PgAdvisorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvisorStore for PgAdvisorStore {
    async fn get(&self, kind: CheckKind) -> Result<Option<AdvisorRecord>> {
        let row = sqlx::query("SELECT data, last_updated FROM aws_advisor WHERE id = $1")
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        match row {
            Some(r) => {
                let data: CheckMap = serde_json::from_value(r.get("data"))
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                Ok(Some(AdvisorRecord {
                    check_type: kind,
                    data,
                    last_updated: r.get("last_updated"),
                }))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, record: &AdvisorRecord) -> Result<()> {
        let data = serde_json::to_value(&record.data)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        sqlx::query(
            "INSERT INTO aws_advisor (id, check_type, data, last_updated)
             VALUES ($1, $1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                 data = EXCLUDED.data,
                 last_updated = EXCLUDED.last_updated",
        )
        .bind(record.check_type.as_str())
        .bind(&data)
        .bind(record.last_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }
}
