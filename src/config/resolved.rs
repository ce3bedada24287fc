//! Resolved resource model: config validated and flattened for runtime use.

use crate::config::FieldKind;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct FieldInfo {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub unique: bool,
}

#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub name: String,
    pub table_name: String,
    /// Declaration order; also the order required fields are checked in.
    pub fields: Vec<FieldInfo>,
}

impl ResolvedResource {
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResolvedModel {
    pub resources: Vec<ResolvedResource>,
    pub resource_by_name: HashMap<String, usize>,
}

impl ResolvedModel {
    pub fn resource(&self, name: &str) -> Option<&ResolvedResource> {
        self.resource_by_name.get(name).and_then(|&i| self.resources.get(i))
    }
}
