use crate::error::ActivityError;
use crate::model::{ActivityDirectory, ActivityView, Confirmation};
use crate::{Activities, QueryService, SignupService, UnregisterService};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use mhs_derive::api_handler;
use mhs_domain::constants::ACTIVITIES_TAG;
use mhs_kernel::server::{ApiState, ErrorResponse};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string of the roster mutations.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(super) struct EmailQuery {
    /// Student email address, e.g. `michael@mergington.edu`
    email: Option<String>,
}

/// Unwraps the `email` parameter. An undecodable query string or a missing
/// parameter is a validation error; the format is checked by the services.
fn required_email(
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<String, ActivityError> {
    let Query(query) = query.map_err(|rejection| {
        ActivityError::validation(format!("Invalid query string: {}", rejection.body_text()))
    })?;

    query
        .email
        .ok_or_else(|| ActivityError::validation("Missing required query parameter: email"))
}

fn activities(state: &ApiState) -> Result<&Activities, ActivityError> {
    Ok(state.try_get_slice::<Activities>()?)
}

#[api_handler(
    get,
    path = "/activities",
    responses((
        status = OK,
        description = "All activities keyed by name",
        body = ActivityDirectory,
    )),
    tag = ACTIVITIES_TAG,
)]
pub(super) async fn list_activities(
    State(state): State<ApiState>,
) -> Result<Json<ActivityDirectory>, ActivityError> {
    let activities = activities(&state)?;
    Ok(Json(QueryService::new(&activities.catalog).list_activities()))
}

#[api_handler(
    get,
    path = "/activities/{activity_name}",
    params(("activity_name" = String, Path, description = "Exact activity name")),
    responses(
        (status = OK, description = "The activity", body = ActivityView),
        (status = NOT_FOUND, description = "Unknown activity", body = ErrorResponse),
    ),
    tag = ACTIVITIES_TAG,
)]
pub(super) async fn get_activity(
    State(state): State<ApiState>,
    Path(activity_name): Path<String>,
) -> Result<Json<ActivityView>, ActivityError> {
    let activities = activities(&state)?;
    QueryService::new(&activities.catalog).get_activity(&activity_name).map(Json)
}

#[api_handler(
    post,
    path = "/activities/{activity_name}/signup",
    params(("activity_name" = String, Path, description = "Exact activity name"), EmailQuery),
    responses(
        (status = OK, description = "Student signed up", body = Confirmation),
        (
            status = BAD_REQUEST,
            description = "Student is already signed up",
            body = ErrorResponse,
        ),
        (status = NOT_FOUND, description = "Unknown activity", body = ErrorResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Missing or malformed email",
            body = ErrorResponse,
        ),
    ),
    tag = ACTIVITIES_TAG,
)]
pub(super) async fn signup(
    State(state): State<ApiState>,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<Confirmation>, ActivityError> {
    let email = required_email(query)?;
    let activities = activities(&state)?;
    SignupService::new(&activities.catalog).signup(&activity_name, &email).map(Json)
}

#[api_handler(
    delete,
    path = "/activities/{activity_name}/unregister",
    params(("activity_name" = String, Path, description = "Exact activity name"), EmailQuery),
    responses(
        (status = OK, description = "Student unregistered", body = Confirmation),
        (
            status = NOT_FOUND,
            description = "Unknown activity or student not registered",
            body = ErrorResponse,
        ),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Missing or malformed email",
            body = ErrorResponse,
        ),
    ),
    tag = ACTIVITIES_TAG,
)]
pub(super) async fn unregister(
    State(state): State<ApiState>,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<Confirmation>, ActivityError> {
    let email = required_email(query)?;
    let activities = activities(&state)?;
    UnregisterService::new(&activities.catalog).unregister(&activity_name, &email).map(Json)
}
