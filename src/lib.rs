//! Contacts API: CRUD REST resources over a single-file SQLite database,
//! every response shaped as a `{code, msg, data?}` envelope.

pub mod config;
pub mod error;
pub mod response;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::{load_from_file, resolve, FullConfig, ResolvedModel, ResolvedResource, Settings};
pub use error::{AppError, ConfigError, ErrorCode};
pub use response::{respond, success_created, success_many, success_message, success_ok, Envelope};
pub use state::AppState;
pub use store::{connect, connect_memory, ensure_resource_tables};
pub use routes::{app, common_routes, resource_routes};
pub use service::{CrudService, RequestValidator};
