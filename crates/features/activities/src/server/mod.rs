//! HTTP surface of the activities slice.

mod error;
mod handlers;
mod router;

pub use router::router;
