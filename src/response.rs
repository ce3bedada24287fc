//! Standard response envelope: `{code, msg, data?}` on every endpoint.

use crate::error::ErrorCode;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: ErrorCode,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// An empty `msg` is replaced by the code's default so the field is never blank.
    pub fn new(code: ErrorCode, msg: impl Into<String>, data: Option<T>) -> Self {
        let msg = msg.into();
        let msg = if msg.trim().is_empty() {
            code.default_message().to_string()
        } else {
            msg
        };
        Envelope { code, msg, data }
    }
}

/// Builds the envelope and picks its status. Pure.
pub fn respond<T: Serialize>(
    code: ErrorCode,
    msg: impl Into<String>,
    data: Option<T>,
    created: bool,
) -> (StatusCode, Json<Envelope<T>>) {
    (code.status(created), Json(Envelope::new(code, msg, data)))
}

pub fn success_ok<T: Serialize>(msg: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    respond(ErrorCode::Success, msg, Some(data), false)
}

pub fn success_created<T: Serialize>(msg: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    respond(ErrorCode::Success, msg, Some(data), true)
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Envelope<Vec<T>>>) {
    respond(ErrorCode::Success, "success", Some(data), false)
}

/// Success with a message and no payload (e.g. delete).
pub fn success_message(msg: &str) -> (StatusCode, Json<Envelope<()>>) {
    respond(ErrorCode::Success, msg, None, false)
}
