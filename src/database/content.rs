use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::content::registry::{ContentKind, ContentTypeDef};
use crate::content::validate::ValidatedDoc;
use crate::database::manager::DatabaseError;

/// One row of the `content_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub content_type: String,
    pub display_order: i32,
    pub is_active: bool,
    pub fields: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRow {
    /// Wire format: type-specific fields flattened alongside the common
    /// document envelope (`_id`, `order`, `isActive`, timestamps).
    pub fn to_api_value(&self) -> Value {
        let mut obj = Map::new();

        if let Value::Object(fields) = &self.fields {
            for (k, v) in fields {
                obj.insert(k.clone(), v.clone());
            }
        }

        obj.insert("_id".into(), Value::String(self.id.to_string()));
        obj.insert("order".into(), Value::from(self.display_order));
        obj.insert("isActive".into(), Value::Bool(self.is_active));
        obj.insert(
            "createdAt".into(),
            Value::String(self.created_at.to_rfc3339()),
        );
        obj.insert(
            "updatedAt".into(),
            Value::String(self.updated_at.to_rfc3339()),
        );

        Value::Object(obj)
    }
}

#[derive(Debug, Default)]
pub struct ListOptions {
    /// Admin listings bypass the `is_active` filter.
    pub include_inactive: bool,
    /// Field filters from the query string; keys come from the registry,
    /// only the values are caller-supplied.
    pub filters: Vec<(&'static str, String)>,
    pub limit: Option<i64>,
}

pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        def: &ContentTypeDef,
        options: &ListOptions,
    ) -> Result<Vec<ContentRow>, DatabaseError> {
        let (sql, params) = build_list_sql(def.slug, options);

        let mut query = sqlx::query_as::<_, ContentRow>(&sql);
        for param in &params {
            query = query.bind(param);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn insert(
        &self,
        def: &ContentTypeDef,
        doc: ValidatedDoc,
    ) -> Result<ContentRow, DatabaseError> {
        let is_active = doc.is_active.unwrap_or(true);
        let mut tx = self.pool.begin().await?;

        if def.kind == ContentKind::SingletonActive && is_active {
            clear_active_siblings(&mut tx, def.slug, None).await?;
        }

        let row: ContentRow = sqlx::query_as(
            "INSERT INTO content_items (content_type, display_order, is_active, fields) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(def.slug)
        .bind(doc.order.unwrap_or(0))
        .bind(is_active)
        .bind(Value::Object(doc.fields))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Partial update: supplied common columns replace, supplied fields
    /// merge into the JSONB document. Returns None when no row matched.
    pub async fn update(
        &self,
        def: &ContentTypeDef,
        id: Uuid,
        doc: ValidatedDoc,
    ) -> Result<Option<ContentRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        if def.kind == ContentKind::SingletonActive && doc.is_active == Some(true) {
            clear_active_siblings(&mut tx, def.slug, Some(id)).await?;
        }

        let row: Option<ContentRow> = sqlx::query_as(
            "UPDATE content_items SET \
                 display_order = COALESCE($3, display_order), \
                 is_active = COALESCE($4, is_active), \
                 fields = fields || $5, \
                 updated_at = NOW() \
             WHERE id = $1 AND content_type = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(def.slug)
        .bind(doc.order)
        .bind(doc.is_active)
        .bind(Value::Object(doc.fields))
        .fetch_optional(&mut *tx)
        .await?;

        match row {
            Some(row) => {
                tx.commit().await?;
                Ok(Some(row))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    pub async fn delete(&self, def: &ContentTypeDef, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1 AND content_type = $2")
            .bind(id)
            .bind(def.slug)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Config singletons: at most one row per type, absence is a valid state.
    pub async fn get_config(
        &self,
        def: &ContentTypeDef,
    ) -> Result<Option<ContentRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ContentRow>(
            "SELECT * FROM content_items WHERE content_type = $1 LIMIT 1",
        )
        .bind(def.slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Upsert-on-first-write for config singletons.
    pub async fn upsert_config(
        &self,
        def: &ContentTypeDef,
        doc: ValidatedDoc,
    ) -> Result<ContentRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<ContentRow> = sqlx::query_as(
            "UPDATE content_items SET fields = fields || $2, updated_at = NOW() \
             WHERE content_type = $1 RETURNING *",
        )
        .bind(def.slug)
        .bind(Value::Object(doc.fields.clone()))
        .fetch_optional(&mut *tx)
        .await?;

        let row = match updated {
            Some(row) => row,
            None => {
                sqlx::query_as(
                    "INSERT INTO content_items (content_type, display_order, is_active, fields) \
                     VALUES ($1, 0, TRUE, $2) RETURNING *",
                )
                .bind(def.slug)
                .bind(Value::Object(doc.fields))
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(row)
    }
}

/// The singleton-active invariant: clearing siblings and writing self happen
/// inside the same transaction, so two concurrent activations cannot leave
/// two active documents behind.
async fn clear_active_siblings(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    slug: &str,
    exclude: Option<Uuid>,
) -> Result<(), DatabaseError> {
    match exclude {
        Some(id) => {
            sqlx::query(
                "UPDATE content_items SET is_active = FALSE, updated_at = NOW() \
                 WHERE content_type = $1 AND is_active = TRUE AND id <> $2",
            )
            .bind(slug)
            .bind(id)
            .execute(&mut **tx)
            .await?;
        }
        None => {
            sqlx::query(
                "UPDATE content_items SET is_active = FALSE, updated_at = NOW() \
                 WHERE content_type = $1 AND is_active = TRUE",
            )
            .bind(slug)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}

fn build_list_sql(slug: &str, options: &ListOptions) -> (String, Vec<String>) {
    let mut sql = String::from("SELECT * FROM content_items WHERE content_type = $1");
    let mut params = vec![slug.to_string()];

    if !options.include_inactive {
        sql.push_str(" AND is_active = TRUE");
    }

    for (field, value) in &options.filters {
        params.push(value.clone());
        sql.push_str(&format!(" AND fields->>'{}' = ${}", field, params.len()));
    }

    sql.push_str(" ORDER BY display_order ASC, created_at DESC");

    if let Some(limit) = options.limit {
        sql.push_str(&format!(" LIMIT {}", limit.clamp(1, 500)));
    }

    (sql, params)
}
