//! Config validation: identifier syntax and uniqueness.

use crate::config::FullConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// Column always present on every resource table.
pub const ID_COLUMN: &str = "id";

const IDENTIFIER_PATTERN: &str = r"^[a-z_][a-z0-9_]*$";

fn check_identifier(re: &Regex, kind: &'static str, name: &str) -> Result<(), ConfigError> {
    if re.is_match(name) && !name.starts_with("sqlite_") {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    if config.resources.is_empty() {
        return Err(ConfigError::Validation("at least one resource required".into()));
    }
    let re = Regex::new(IDENTIFIER_PATTERN).map_err(|e| ConfigError::Validation(e.to_string()))?;
    let mut names = HashSet::new();
    let mut tables = HashSet::new();
    for r in &config.resources {
        check_identifier(&re, "resource", &r.name)?;
        let table = r.table.as_deref().unwrap_or(&r.name);
        check_identifier(&re, "table", table)?;
        if !names.insert(r.name.as_str()) || !tables.insert(table) {
            return Err(ConfigError::DuplicateResource(r.name.clone()));
        }
        if r.fields.is_empty() {
            return Err(ConfigError::Validation(format!(
                "resource '{}' declares no fields",
                r.name
            )));
        }
        let mut fields = HashSet::new();
        for f in &r.fields {
            check_identifier(&re, "field", &f.name)?;
            if f.name == ID_COLUMN {
                return Err(ConfigError::Validation(format!(
                    "resource '{}': '{}' is reserved",
                    r.name, ID_COLUMN
                )));
            }
            if !fields.insert(f.name.as_str()) {
                return Err(ConfigError::DuplicateField {
                    resource: r.name.clone(),
                    field: f.name.clone(),
                });
            }
        }
    }
    Ok(())
}
