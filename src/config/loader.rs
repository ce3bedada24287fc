//! Load resource declarations from a JSON file and resolve them into the runtime model.

use crate::config::resolved::{FieldInfo, ResolvedModel, ResolvedResource};
use crate::config::{validate, FullConfig};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Build resolved model from full config. Validates first.
pub fn resolve(config: &FullConfig) -> Result<ResolvedModel, ConfigError> {
    validate(config)?;

    let mut resources = Vec::with_capacity(config.resources.len());
    let mut resource_by_name = HashMap::new();

    for r in &config.resources {
        let fields = r
            .fields
            .iter()
            .map(|f| FieldInfo {
                name: f.name.clone(),
                kind: f.kind,
                required: f.required,
                unique: f.unique,
            })
            .collect();
        resource_by_name.insert(r.name.clone(), resources.len());
        resources.push(ResolvedResource {
            name: r.name.clone(),
            table_name: r.table.clone().unwrap_or_else(|| r.name.clone()),
            fields,
        });
    }

    Ok(ResolvedModel {
        resources,
        resource_by_name,
    })
}

pub fn parse_config(json: &str) -> Result<FullConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Read `{"resources": [...]}` from disk.
pub async fn load_from_file(path: impl AsRef<Path>) -> Result<FullConfig, ConfigError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldKind;

    #[test]
    fn resolves_builtin_contacts() {
        let model = resolve(&FullConfig::contacts()).unwrap();
        let contacts = model.resource("contacts").unwrap();
        assert_eq!(contacts.table_name, "contacts");
        assert_eq!(contacts.required_fields().collect::<Vec<_>>(), vec!["name", "phone"]);
        assert!(contacts.field("phone").unwrap().unique);
        assert!(model.resource("orders").is_none());
    }

    #[test]
    fn parses_json_declarations_with_defaults() {
        let cfg = parse_config(
            r#"{"resources": [{"name": "books", "table": "library_books",
                "fields": [{"name": "title", "required": true}, {"name": "pages", "kind": "integer"}]}]}"#,
        )
        .unwrap();
        let model = resolve(&cfg).unwrap();
        let books = model.resource("books").unwrap();
        assert_eq!(books.table_name, "library_books");
        assert_eq!(books.field("title").unwrap().kind, FieldKind::Text);
        assert_eq!(books.field("pages").unwrap().kind, FieldKind::Integer);
        assert!(!books.field("pages").unwrap().required);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(parse_config("{"), Err(ConfigError::Load(_))));
    }
}
