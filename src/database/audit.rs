use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::{Database, DatabaseError};

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub user_id: Uuid,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<Uuid>,
    pub details: Option<Value>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AuditLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<Uuid>,
    pub details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogRow {
    pub fn to_api_value(&self) -> Value {
        json!({
            "_id": self.id,
            "userId": self.user_id,
            "action": self.action,
            "resource": self.resource,
            "resourceId": self.resource_id,
            "details": self.details,
            "timestamp": self.created_at.to_rfc3339(),
        })
    }
}

#[derive(Debug, Default)]
pub struct AuditQuery {
    pub user_id: Option<Uuid>,
    pub action: Option<String>,
    pub limit: i64,
}

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO audit_logs (user_id, action, resource, resource_id, details) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.resource)
        .bind(entry.resource_id)
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Newest-first read with optional actor/action filters.
    pub async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLogRow>, DatabaseError> {
        let limit = query.limit.clamp(1, 500);

        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT * FROM audit_logs \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
               AND ($2::text IS NULL OR action = $2) \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(query.user_id)
        .bind(query.action.as_deref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Fire-and-forget audit dispatch. The write runs on a detached task; a
/// failure is logged and swallowed so logging latency or errors can never
/// affect the user-facing response.
#[derive(Clone)]
pub struct AuditLogger {
    db: Database,
}

impl AuditLogger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn record(&self, entry: AuditEntry) {
        let db = self.db.clone();
        tokio::spawn(async move {
            let pool = match db.pool().await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::warn!("audit log skipped, database unavailable: {}", e);
                    return;
                }
            };

            if let Err(e) = AuditRepository::new(pool).append(&entry).await {
                tracing::warn!(
                    "audit log write failed for {} {}: {}",
                    entry.action,
                    entry.resource,
                    e
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_value_shape() {
        let row = AuditLogRow {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            action: "update".into(),
            resource: "partners".into(),
            resource_id: None,
            details: Some(json!({"fields": ["website"]})),
            created_at: Utc::now(),
        };

        let v = row.to_api_value();
        assert_eq!(v["action"], "update");
        assert_eq!(v["resource"], "partners");
        assert_eq!(v["resourceId"], Value::Null);
        assert!(v.get("timestamp").is_some());
    }
}
