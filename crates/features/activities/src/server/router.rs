use super::handlers;
use mhs_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes of the activities slice. Expects [`crate::Activities`] in the state.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_activities))
        .routes(routes!(handlers::get_activity))
        .routes(routes!(handlers::signup))
        .routes(routes!(handlers::unregister))
}
