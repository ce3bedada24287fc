//! Shared application state for all routes: the store handle and the resource model.

use crate::config::ResolvedModel;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub model: Arc<ResolvedModel>,
}

impl AppState {
    pub fn new(pool: SqlitePool, model: ResolvedModel) -> Self {
        AppState {
            pool,
            model: Arc::new(model),
        }
    }
}
