//! Facade crate for the activities platform features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `mhs` with the `server` feature.
//! - Call [`init`] to build every feature slice, register them in the API state,
//!   and mount [`server::router::api_router`].

use std::borrow::Cow;

pub use mhs_domain as domain;
use mhs_domain::config::ApiConfig;
use mhs_domain::registry::InitializedSlice;
pub use mhs_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use mhs_kernel::server::ApiState;
        pub use mhs_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System endpoints plus every feature router.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router().merge(crate::features::activities::server::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use mhs_activities as activities;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "activities",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Failure while building a feature slice.
#[mhs_derive::mhs_error]
pub enum SliceInitError {
    #[error("Activities slice failed{}: {source}", format_context(.context))]
    Activities { source: mhs_activities::ActivityError, context: Option<Cow<'static, str>> },
}

/// Initialize all enabled features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, SliceInitError> {
    let mut slices = Vec::new();

    // Activities
    slices.push(features::activities::init().context("Activities")?);

    tracing::info!(
        slices = slices.len(),
        static_dir = %config.storage.static_dir.display(),
        "Feature slices initialized"
    );
    Ok(slices)
}
