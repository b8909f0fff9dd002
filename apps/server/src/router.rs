use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use mhs::domain::constants::{API_DOCS_PATH, LANDING_PAGE, STATIC_PREFIX};
use mhs::kernel::prelude::ApiState;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "Mergington High School API",
    description = "View and sign up for extracurricular activities"
))]
struct ApiDoc;

/// Builds the application: landing redirect, JSON API, docs and static files.
pub fn init(state: ApiState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(mhs::server::router::api_router())
        .with_state(state)
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url(API_DOCS_PATH, api_doc);

    Router::new()
        .route("/", get(|| async { Redirect::temporary(LANDING_PAGE) }))
        .merge(openapi_routes)
        .merge(scalar_routes)
        .nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
