//! Specification and generation routes, nested under `/api`

use crate::api::handlers::{codegen, specs};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/specs", post(specs::create_spec))
        .route("/specs/:id", get(specs::get_spec))
        .route("/codegen/manifest", post(codegen::manifest_inline))
        .route("/codegen/archive", post(codegen::archive_inline))
        .route("/codegen/:id/manifest", get(codegen::manifest_for_spec))
        .route("/codegen/:id/archive", get(codegen::archive_for_spec))
}
