//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, the API state registry,
//! the error body every endpoint renders, and the system endpoints.
//!
//! ## Config loading
//! ```rust,no_run
//! use mhs_kernel::config::load_config;
//! use mhs_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use mhs_domain as domain;
