//! CrudService: generic CRUD over the SQL builder, plus request validation.

mod crud;
mod validation;
pub use crud::{CrudService, BULK_LIMIT, DEFAULT_LIMIT, MAX_LIMIT};
pub use validation::{sanitize_body, sanitize_str, sanitize_value, RequestValidator};
