//! Raw resource declarations as read from JSON.

use serde::{Deserialize, Serialize};

/// Storage class of a field. Drives the column type in DDL only; request
/// values are never coerced to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Real,
}

impl FieldKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Integer => "INTEGER",
            FieldKind::Real => "REAL",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Path segment under `/api`.
    pub name: String,
    /// Table name; defaults to `name`.
    #[serde(default)]
    pub table: Option<String>,
    pub fields: Vec<FieldConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FullConfig {
    pub resources: Vec<ResourceConfig>,
}

impl FullConfig {
    /// Built-in model: a single `contacts` resource.
    pub fn contacts() -> Self {
        let field = |name: &str, required: bool, unique: bool| FieldConfig {
            name: name.into(),
            kind: FieldKind::Text,
            required,
            unique,
        };
        FullConfig {
            resources: vec![ResourceConfig {
                name: "contacts".into(),
                table: None,
                fields: vec![
                    field("name", true, false),
                    field("phone", true, true),
                    field("email", false, false),
                ],
            }],
        }
    }
}
