//! Server-side kernel: shared state, error body and system routes.

mod error;
mod health;
pub mod router;
mod state;

pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
