mod error;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::service::ModelService;

pub use error::{ApiError, ErrorBody};
pub use handlers::{slugify, SlugError};

/// Shared handler state.
///
/// Every models handler holds the lock for its whole body, so at most one
/// read or write touches the models directory at a time.
#[derive(Clone)]
pub struct AppState {
    models: Arc<Mutex<ModelService>>,
}

impl AppState {
    pub fn new(service: ModelService) -> Self {
        Self {
            models: Arc::new(Mutex::new(service)),
        }
    }
}

/// Options that shape the router but come from project configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterOptions {
    /// Answer `OPTIONS` with 204 and add permissive CORS headers to every response.
    pub enable_cors: bool,
}

pub fn create_router(service: ModelService, options: RouterOptions) -> Router {
    let router = Router::new()
        // Models
        .route(
            "/api/models",
            get(handlers::list_models).post(handlers::create_model),
        )
        .route(
            "/api/models/{slug}",
            get(handlers::get_model)
                .put(handlers::update_model)
                .delete(handlers::delete_model),
        )
        // Registry
        .route("/api/field-types", get(handlers::list_field_types))
        // Health
        .route("/api/health", get(handlers::health))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(AppState::new(service));

    let router = router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if options.enable_cors {
        router.layer(axum::middleware::from_fn(middleware::cors_middleware))
    } else {
        router
    }
}
