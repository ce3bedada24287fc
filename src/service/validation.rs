//! Request sanitization and required-field validation.

use crate::error::AppError;
use serde_json::Value;
use std::collections::HashMap;

/// Remove `<` and `>`, then trim. Best-effort markup stripping, not an injection boundary.
pub fn sanitize_str(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize every string in place, including strings nested in arrays and objects.
pub fn sanitize_value(v: &mut Value) {
    match v {
        Value::String(s) => *s = sanitize_str(s),
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(map) => map.values_mut().for_each(sanitize_value),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

pub fn sanitize_body(body: &mut HashMap<String, Value>) {
    body.values_mut().for_each(sanitize_value);
}

fn is_missing(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Name of the first required field (in the given order) that is absent, null or blank.
    pub fn first_missing<'a, I>(body: &HashMap<String, Value>, required: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        required.into_iter().find(|f| is_missing(body.get(*f)))
    }

    /// Run on a sanitized body. Present values are not type-checked.
    pub fn validate<'a, I>(body: &HashMap<String, Value>, required: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match Self::first_missing(body, required) {
            Some(field) => Err(AppError::Validation(format!("{} is required", field))),
            None => Ok(()),
        }
    }

    /// Sanitize then validate: the order matters so whitespace-only strings count as missing.
    pub fn prepare<'a, I>(body: &mut HashMap<String, Value>, required: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        sanitize_body(body);
        Self::validate(body, required)
    }
}
