//! Generic CRUD execution against SQLite.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::sql::{bind_all, delete, insert, select_by_id, select_list, update, QueryBuf};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::fmt::Debug;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;
pub const BULK_LIMIT: usize = 100;

pub struct CrudService;

impl CrudService {
    /// List rows with optional exact-match filters, limit (default 100, max 1000), offset (default 0).
    pub async fn list(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        filters: &[(String, Value)],
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Value>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = offset.unwrap_or(0);
        let q = select_list(resource, filters, limit, offset);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(&q.sql, &q.params)
            .fetch_all(pool)
            .await
            .map_err(|e| db_failure(resource, "list", &filters, e))?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    /// Fetch one row by id. `None` when absent.
    pub async fn read(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        id: i64,
    ) -> Result<Option<Value>, AppError> {
        let mut q = select_by_id(resource);
        q.params.push(Value::from(id));
        Self::fetch_optional(pool, resource, "read", &q, &id).await
    }

    /// Insert one row. Returns the created row with its assigned id.
    pub async fn create(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        let q = insert(resource, body);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(&q.sql, &q.params)
            .fetch_one(pool)
            .await
            .map_err(|e| db_failure(resource, "create", body, e))?;
        Ok(row_to_json(&row))
    }

    /// Replace the named fields of one row. `None` when the id does not exist.
    pub async fn update(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        id: i64,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(resource, id, body);
        Self::fetch_optional(pool, resource, "update", &q, &(id, body)).await
    }

    /// Delete one row by id. `false` when nothing was deleted.
    pub async fn delete(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        id: i64,
    ) -> Result<bool, AppError> {
        let mut q = delete(resource);
        q.params.push(Value::from(id));
        let row = Self::fetch_optional(pool, resource, "delete", &q, &id).await?;
        Ok(row.is_some())
    }

    /// Insert all items in one transaction: either every row commits or none does.
    pub async fn bulk_create(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        items: &[HashMap<String, Value>],
    ) -> Result<Vec<Value>, AppError> {
        if items.len() > BULK_LIMIT {
            return Err(AppError::Validation(format!(
                "bulk import limited to {} items",
                BULK_LIMIT
            )));
        }
        let mut out = Vec::with_capacity(items.len());
        // Rolled back on drop, so every early return below discards the batch.
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| db_failure(resource, "bulk_create", &"begin", e))?;
        for (index, body) in items.iter().enumerate() {
            let q = insert(resource, body);
            tracing::debug!(sql = %q.sql, params = ?q.params, index, "query (tx)");
            let row = bind_all(&q.sql, &q.params)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| db_failure(resource, "bulk_create", &(index, body), e))?;
            out.push(row_to_json(&row));
        }
        tx.commit()
            .await
            .map_err(|e| db_failure(resource, "bulk_create", &"commit", e))?;
        tracing::info!(resource = %resource.name, count = out.len(), "bulk import committed");
        Ok(out)
    }

    async fn fetch_optional(
        pool: &SqlitePool,
        resource: &ResolvedResource,
        operation: &'static str,
        q: &QueryBuf,
        input: &impl Debug,
    ) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(&q.sql, &q.params)
            .fetch_optional(pool)
            .await
            .map_err(|e| db_failure(resource, operation, input, e))?;
        Ok(row.map(|r| row_to_json(&r)))
    }
}

/// Logs the full driver error with the triggering input; the client only ever sees the code.
fn db_failure(
    resource: &ResolvedResource,
    operation: &'static str,
    input: &impl Debug,
    err: sqlx::Error,
) -> AppError {
    tracing::error!(
        resource = %resource.name,
        operation,
        input = ?input,
        error = %err,
        detail = ?err,
        "database operation failed"
    );
    AppError::Db(err)
}

/// Row as a JSON object. NULL columns are left out.
fn row_to_json(row: &SqliteRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        if let Some(v) = cell_to_value(row, name) {
            map.insert(name.to_string(), v);
        }
    }
    Value::Object(map)
}

fn cell_to_value(row: &SqliteRow, name: &str) -> Option<Value> {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Some(Value::Number(n.into()));
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        return serde_json::Number::from_f64(n).map(Value::Number);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Some(Value::String(s));
    }
    None
}
