use mhs_derive::api_model;

/// Body of every non-2xx response.
#[api_model]
pub struct ErrorResponse {
    /// Human-readable reason, e.g. `Activity not found`.
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}
