//! Activities feature slice: the school's extracurricular catalog and the
//! signup/unregister rules applied to it.
//!
//! The core (catalog, services) is plain synchronous Rust; the `server`
//! feature adds the Axum handlers and their `OpenAPI` router.
//!
//! ```rust
//! use mhs_activities::{ActivityCatalog, QueryService, SignupService};
//!
//! let catalog = ActivityCatalog::seeded()?;
//! SignupService::new(&catalog).signup("Chess Club", "new@mergington.edu")?;
//! let chess = QueryService::new(&catalog).get_activity("Chess Club")?;
//! assert!(chess.participants.iter().any(|p| p == "new@mergington.edu"));
//! # Ok::<(), mhs_activities::ActivityError>(())
//! ```

pub mod catalog;
pub mod email;
pub mod error;
pub mod model;
pub mod query;
pub mod seed;
#[cfg(feature = "server")]
pub mod server;
pub mod signup;
pub mod unregister;

pub use crate::catalog::{Activity, ActivityCatalog, ActivityRecord};
pub use crate::email::ParticipantEmail;
pub use crate::error::{ActivityError, ActivityErrorExt};
pub use crate::model::{ActivityDirectory, ActivityView, Confirmation};
pub use crate::query::QueryService;
pub use crate::signup::SignupService;
pub use crate::unregister::UnregisterService;

use mhs_kernel::domain::registry::InitializedSlice;

/// Activities feature state
#[mhs_derive::mhs_slice]
pub struct Activities {
    pub catalog: ActivityCatalog,
}

impl Activities {
    #[must_use]
    pub fn from_catalog(catalog: ActivityCatalog) -> Self {
        Self::new(ActivitiesInner { catalog })
    }
}

/// Initialize the activities feature with the built-in catalog.
///
/// # Errors
/// Returns an error if the built-in activity list is inconsistent.
pub fn init() -> Result<InitializedSlice, ActivityError> {
    let catalog = ActivityCatalog::seeded().context("Failed to seed activity catalog")?;

    tracing::info!(activities = catalog.len(), "Activities slice initialized");

    Ok(Activities::from_catalog(catalog).into())
}
