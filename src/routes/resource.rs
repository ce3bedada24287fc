//! Resource CRUD routes. The resource name is a path parameter; handlers resolve it against the model.

use crate::handlers::resource::{bulk_import, create, delete as delete_handler, list, read, update};
use crate::routes::common::method_not_allowed;
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/:resource", get(list).post(create))
        .route("/:resource/import", post(bulk_import))
        .route(
            "/:resource/:id",
            get(read).put(update).delete(delete_handler),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}
