//! Resource CRUD handlers: list, read, create, update, delete, bulk import.
//! Each handler sanitizes and validates before its single store call; every outcome is an envelope.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::response::{success_created, success_many, success_message, success_ok};
use crate::service::{CrudService, RequestValidator, BULK_LIMIT};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn resource<'a>(state: &'a AppState, name: &str) -> Result<&'a ResolvedResource, AppError> {
    state
        .model
        .resource(name)
        .ok_or_else(|| AppError::NotFound(format!("resource '{}' not found", name)))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::Validation("invalid id".into()))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match payload {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected request body");
            Err(AppError::Validation("invalid JSON body".into()))
        }
    }
}

fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::Validation("request body must be a JSON object".into())),
    }
}

fn not_found(resource: &ResolvedResource, id: i64) -> AppError {
    AppError::NotFound(format!("{} {} not found", resource.name, id))
}

pub async fn list(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resource(&state, &name)?;

    let mut limit: Option<u32> = None;
    let mut offset: Option<u32> = None;
    let mut filters: Vec<(String, Value)> = Vec::new();

    for (k, v) in params {
        match k.as_str() {
            "limit" => limit = v.parse().ok(),
            "offset" => offset = v.parse().ok(),
            _ => {
                if resource.field(&k).is_some() {
                    filters.push((k, Value::String(v)));
                }
            }
        }
    }
    filters.sort_by(|a, b| a.0.cmp(&b.0));

    let rows = CrudService::list(&state.pool, resource, &filters, limit, offset).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((name, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resource(&state, &name)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::read(&state.pool, resource, id)
        .await?
        .ok_or_else(|| not_found(resource, id))?;
    Ok(success_ok("success", row))
}

pub async fn create(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resource(&state, &name)?;
    let mut body = body_to_map(json_body(payload)?)?;
    RequestValidator::prepare(&mut body, resource.required_fields())?;
    let row = CrudService::create(&state.pool, resource, &body).await?;
    tracing::info!(resource = %resource.name, id = ?row.get("id"), "created");
    Ok(success_created("created", row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((name, id_str)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resource(&state, &name)?;
    let id = parse_id(&id_str)?;
    let mut body = body_to_map(json_body(payload)?)?;
    RequestValidator::prepare(&mut body, resource.required_fields())?;
    let row = CrudService::update(&state.pool, resource, id, &body)
        .await?
        .ok_or_else(|| not_found(resource, id))?;
    tracing::info!(resource = %resource.name, id, "updated");
    Ok(success_ok("updated", row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((name, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resource(&state, &name)?;
    let id = parse_id(&id_str)?;
    if !CrudService::delete(&state.pool, resource, id).await? {
        return Err(not_found(resource, id));
    }
    tracing::info!(resource = %resource.name, id, "deleted");
    Ok(success_message("deleted"))
}

pub async fn bulk_import(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resource(&state, &name)?;
    let items = match json_body(payload)? {
        Value::Array(arr) => arr,
        _ => return Err(AppError::Validation("request body must be a JSON array".into())),
    };
    if items.len() > BULK_LIMIT {
        return Err(AppError::Validation(format!(
            "bulk import limited to {} items",
            BULK_LIMIT
        )));
    }
    let mut bodies = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let mut body = body_to_map(item).map_err(|e| item_error(index, e))?;
        RequestValidator::prepare(&mut body, resource.required_fields())
            .map_err(|e| item_error(index, e))?;
        bodies.push(body);
    }
    let rows = CrudService::bulk_create(&state.pool, resource, &bodies).await?;
    Ok(success_created("imported", rows))
}

fn item_error(index: usize, err: AppError) -> AppError {
    match err {
        AppError::Validation(msg) => AppError::Validation(format!("item {}: {}", index, msg)),
        other => other,
    }
}
