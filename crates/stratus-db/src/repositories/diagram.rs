//! PostgreSQL implementation of DiagramStore.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use stratus_core::diagram::Diagram;
use stratus_core::ports::DiagramStore;
use stratus_core::{Error, Result};

/// PostgreSQL implementation of DiagramStore.
#[derive(Clone)]
pub struct PgDiagramStore {
    pool: PgPool,
}

impl PgDiagramStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_diagram(r: PgRow) -> Diagram {
    Diagram {
        id: r.get("id"),
        name: r.get("name"),
        user_id: r.get("user_id"),
        diagram_data: r.get("diagram_data"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

const DIAGRAM_COLUMNS: &str = "id, name, user_id, diagram_data, created_at, updated_at";

#[async_trait]
impl DiagramStore for PgDiagramStore {
    async fn find_by_name(&self, name: &str, user_id: &str) -> Result<Option<Diagram>> {
        let row = sqlx::query(&format!(
            "SELECT {DIAGRAM_COLUMNS} FROM architecture_diagrams WHERE name = $1 AND user_id = $2 LIMIT 1",
        ))
        .bind(name)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(row_to_diagram))
    }

    async fn insert(&self, name: &str, user_id: &str, data: &Value) -> Result<Diagram> {
        let row = sqlx::query(&format!(
            "INSERT INTO architecture_diagrams (name, user_id, diagram_data)
             VALUES ($1, $2, $3)
             RETURNING {DIAGRAM_COLUMNS}",
        ))
        .bind(name)
        .bind(user_id)
        .bind(data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row_to_diagram(row))
    }

    async fn update_data(&self, id: i64, data: &Value) -> Result<Diagram> {
        let row = sqlx::query(&format!(
            "UPDATE architecture_diagrams SET diagram_data = $2, updated_at = now()
             WHERE id = $1
             RETURNING {DIAGRAM_COLUMNS}",
        ))
        .bind(id)
        .bind(data)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        row.map(row_to_diagram)
            .ok_or_else(|| Error::NotFound(format!("Diagram {id}")))
    }

    async fn get(&self, id: i64) -> Result<Option<Diagram>> {
        let row = sqlx::query(&format!(
            "SELECT {DIAGRAM_COLUMNS} FROM architecture_diagrams WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(row_to_diagram))
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Diagram>> {
        let rows = sqlx::query(&format!(
            "SELECT {DIAGRAM_COLUMNS} FROM architecture_diagrams WHERE user_id = $1 ORDER BY updated_at DESC",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().map(row_to_diagram).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM architecture_diagrams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
