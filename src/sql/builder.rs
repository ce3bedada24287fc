//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and DDL from a resolved resource.
//! Identifiers come from validated config only; values are always bound parameters.

use crate::config::{ResolvedResource, ID_COLUMN};
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for SQLite (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Records the value and returns its placeholder.
    fn push_param(&mut self, v: Value) -> String {
        self.params.push(v);
        format!("?{}", self.params.len())
    }
}

/// `"id", "field1", ...` in declaration order.
fn select_column_list(resource: &ResolvedResource) -> String {
    std::iter::once(ID_COLUMN)
        .chain(resource.fields.iter().map(|f| f.name.as_str()))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declared fields present in `body`, in declaration order. Unknown keys are dropped.
fn present_fields<'a>(resource: &'a ResolvedResource, body: &HashMap<String, Value>) -> Vec<(&'a str, Value)> {
    resource
        .fields
        .iter()
        .filter_map(|f| body.get(&f.name).map(|v| (f.name.as_str(), v.clone())))
        .collect()
}

pub fn create_table(resource: &ResolvedResource) -> String {
    let mut cols = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quoted(ID_COLUMN))];
    for f in &resource.fields {
        let mut def = format!("{} {}", quoted(&f.name), f.kind.sql_type());
        if f.required {
            def.push_str(" NOT NULL");
        }
        if f.unique {
            def.push_str(" UNIQUE");
        }
        cols.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(&resource.table_name),
        cols.join(", ")
    )
}

/// SELECT by id. Caller binds the id as the sole param.
pub fn select_by_id(resource: &ResolvedResource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        select_column_list(resource),
        quoted(&resource.table_name),
        quoted(ID_COLUMN)
    );
    q
}

/// SELECT list with exact-match filters, ordered by id.
pub fn select_list(
    resource: &ResolvedResource,
    filters: &[(String, Value)],
    limit: u32,
    offset: u32,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sql = format!(
        "SELECT {} FROM {}",
        select_column_list(resource),
        quoted(&resource.table_name)
    );
    let mut conditions = Vec::new();
    for (col, v) in filters {
        if resource.field(col).is_none() {
            continue;
        }
        let p = q.push_param(v.clone());
        conditions.push(format!("{} = {}", quoted(col), p));
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY {}", quoted(ID_COLUMN)));
    let lp = q.push_param(Value::from(limit));
    let op = q.push_param(Value::from(offset));
    sql.push_str(&format!(" LIMIT {} OFFSET {}", lp, op));
    q.sql = sql;
    q
}

/// INSERT ... RETURNING the full row.
pub fn insert(resource: &ResolvedResource, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let fields = present_fields(resource, body);
    let table = quoted(&resource.table_name);
    let returning = select_column_list(resource);
    if fields.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning);
        return q;
    }
    let mut cols = Vec::with_capacity(fields.len());
    let mut placeholders = Vec::with_capacity(fields.len());
    for (name, v) in fields {
        cols.push(quoted(name));
        placeholders.push(q.push_param(v));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        returning
    );
    q
}

/// UPDATE ... WHERE id = ? RETURNING the full row. With nothing to set this degrades
/// to a SELECT by id so the caller still sees the current row or none.
pub fn update(resource: &ResolvedResource, id: i64, body: &HashMap<String, Value>) -> QueryBuf {
    let fields = present_fields(resource, body);
    if fields.is_empty() {
        let mut q = select_by_id(resource);
        q.params.push(Value::from(id));
        return q;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(fields.len());
    for (name, v) in fields {
        let p = q.push_param(v);
        sets.push(format!("{} = {}", quoted(name), p));
    }
    let idp = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(&resource.table_name),
        sets.join(", "),
        quoted(ID_COLUMN),
        idp,
        select_column_list(resource)
    );
    q
}

/// DELETE by id RETURNING the id. Caller binds the id as the sole param.
pub fn delete(resource: &ResolvedResource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?1 RETURNING {}",
        quoted(&resource.table_name),
        quoted(ID_COLUMN),
        quoted(ID_COLUMN)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, FullConfig};
    use serde_json::json;

    fn contacts() -> ResolvedResource {
        resolve(&FullConfig::contacts()).unwrap().resource("contacts").unwrap().clone()
    }

    fn body(v: Value) -> HashMap<String, Value> {
        v.as_object().unwrap().clone().into_iter().collect()
    }

    #[test]
    fn ddl_carries_constraints() {
        assert_eq!(
            create_table(&contacts()),
            "CREATE TABLE IF NOT EXISTS \"contacts\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
             \"name\" TEXT NOT NULL, \"phone\" TEXT NOT NULL UNIQUE, \"email\" TEXT)"
        );
    }

    #[test]
    fn insert_binds_values_and_ignores_unknown_keys() {
        let q = insert(
            &contacts(),
            &body(json!({"phone": "555-0100", "name": "Alice", "id": 42, "admin": true})),
        );
        assert_eq!(
            q.sql,
            "INSERT INTO \"contacts\" (\"name\", \"phone\") VALUES (?1, ?2) \
             RETURNING \"id\", \"name\", \"phone\", \"email\""
        );
        assert_eq!(q.params, vec![json!("Alice"), json!("555-0100")]);
    }

    #[test]
    fn hostile_values_never_reach_sql_text() {
        let q = insert(&contacts(), &body(json!({"name": "x'); DROP TABLE contacts; --"})));
        assert!(!q.sql.contains("DROP"));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn update_puts_id_last() {
        let q = update(&contacts(), 7, &body(json!({"name": "Bob"})));
        assert_eq!(
            q.sql,
            "UPDATE \"contacts\" SET \"name\" = ?1 WHERE \"id\" = ?2 \
             RETURNING \"id\", \"name\", \"phone\", \"email\""
        );
        assert_eq!(q.params, vec![json!("Bob"), json!(7)]);
    }

    #[test]
    fn empty_update_selects_current_row() {
        let q = update(&contacts(), 3, &HashMap::new());
        assert!(q.sql.starts_with("SELECT"));
        assert_eq!(q.params, vec![json!(3)]);
    }

    #[test]
    fn list_filters_only_declared_fields() {
        let q = select_list(
            &contacts(),
            &[("name".into(), json!("Alice")), ("password".into(), json!("x"))],
            10,
            20,
        );
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"name\", \"phone\", \"email\" FROM \"contacts\" \
             WHERE \"name\" = ?1 ORDER BY \"id\" LIMIT ?2 OFFSET ?3"
        );
        assert_eq!(q.params, vec![json!("Alice"), json!(10), json!(20)]);
    }
}
