use crate::error::ActivityError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mhs_kernel::server::{ApiStateError, ErrorResponse};

impl ActivityError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::NotRegistered { .. } => StatusCode::NOT_FOUND,
            Self::AlreadySignedUp { .. } => StatusCode::BAD_REQUEST,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Activities request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Activities request rejected");
        }

        (status, Json(ErrorResponse::new(self.detail()))).into_response()
    }
}

impl From<ApiStateError> for ActivityError {
    fn from(err: ApiStateError) -> Self {
        Self::Internal { message: err.to_string().into(), context: Some("api state".into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_variant_to_its_status() {
        let cases = [
            (ActivityError::not_found("Knitting"), StatusCode::NOT_FOUND),
            (
                ActivityError::AlreadySignedUp {
                    activity: "Chess Club".to_owned(),
                    email: "a@x.edu".to_owned(),
                    context: None,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ActivityError::NotRegistered {
                    activity: "Chess Club".to_owned(),
                    email: "a@x.edu".to_owned(),
                    context: None,
                },
                StatusCode::NOT_FOUND,
            ),
            (ActivityError::validation("email is required"), StatusCode::UNPROCESSABLE_ENTITY),
            (ActivityError::from("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
