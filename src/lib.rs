pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod template;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::TemplateCatalog;

/// Largest accepted body for POST /expand
const MAX_BODY_BYTES: usize = 64 * 1024;

// Application state
pub struct AppState {
    pub catalog: TemplateCatalog,
}

impl AppState {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }
}

// Public function to create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::catalog::list_templates))
        .route("/t/{alias}", get(handlers::redirect::redirect))
        .route("/expand", post(handlers::expand::expand_template))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
