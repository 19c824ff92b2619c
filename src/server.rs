//! Axum router construction.
//!
//! The [`app`] function wires every endpoint to its handler, nests them
//! under the configured API version prefix, mounts Swagger UI next to the
//! OpenAPI document, and returns a ready-to-serve [`axum::Router`].

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{books, health};
use crate::metrics::{metrics_handler, metrics_middleware};
use crate::AppState;

// -- OpenAPI document ---------------------------------------------------------

/// OpenAPI documentation for the book registry API.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        books::create_book,
        books::get_book,
        books::delete_book,
    ),
    components(schemas(
        crate::model::Book,
        crate::errors::ErrorBody,
        health::HealthStatus,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Books", description = "Book registration by ISBN"),
    )
)]
struct ApiDoc;

/// Build the OpenAPI document for this deployment.
///
/// Title, version and description come from the project metadata; the
/// configured version prefix is advertised as the server URL.
pub fn openapi(state: &AppState) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = state.project.name.clone();
    doc.info.version = state.project.version.clone();
    doc.info.description = Some(state.project.description.clone());
    if let Some(mount) = state.config.api.mount_path() {
        doc.servers = Some(vec![Server::new(mount)]);
    }
    doc
}

/// Build the axum [`Router`] with all routes.
///
/// The returned router is ready to be passed to `axum::serve` or to the
/// Lambda runtime.
pub fn app(state: Arc<AppState>) -> Router {
    let mut api = Router::new()
        .route("/health", get(health::health_check))
        .route("/books", post(books::create_book))
        .route(
            "/books/:isbn",
            get(books::get_book).delete(books::delete_book),
        );

    if state.config.observability.metrics {
        api = api.route("/metrics", get(metrics_handler));
    }

    let mount = state.config.api.mount_path();
    let router = match &mount {
        Some(mount) => Router::new().nest(mount, api),
        None => api,
    };

    // Swagger UI at /docs, OpenAPI document at /openapi.json, both under the mount.
    let base = mount.unwrap_or_default();
    let docs = SwaggerUi::new(format!("{base}/docs"))
        .url(format!("{base}/openapi.json"), openapi(&state));

    router
        .merge(docs)
        .with_state(state)
        // metrics_middleware is inner so TraceLayer spans cover it.
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
