//! Names shared between the router, the `OpenAPI` document and the slices.

/// `OpenAPI` tag for operational endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the activities slice.
pub const ACTIVITIES_TAG: &str = "Activities";

/// URL prefix under which the static directory is served.
pub const STATIC_PREFIX: &str = "/static";
/// Landing page that `GET /` redirects to.
pub const LANDING_PAGE: &str = "/static/index.html";
/// Path of the interactive API reference.
pub const API_DOCS_PATH: &str = "/api";
