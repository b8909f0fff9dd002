#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the activities workspace.
//!
//! * [`macro@main`] boots the tuned Tokio runtime from `mhs-runtime`.
//! * [`macro@mhs_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@mhs_slice`] wraps feature state into a cheaply clonable slice handle.
//! * [`macro@api_model`] and [`macro@api_handler`] keep DTOs and Axum handlers
//!   consistent with the generated `OpenAPI` document.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot expand its own
//! macros; the consuming crates exercise them in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime.
///
/// Turns an `async fn main` returning a `Result` into a blocking `fn main` that
/// builds a runtime from the named [`RuntimeConfig`] profile.
///
/// # Arguments
///
/// * `high_performance` - server workloads.
/// * `memory_efficient` - small footprint, half the worker threads.
/// * `default` (or no argument) - auto-detected worker threads.
///
/// # Examples
///
/// ```rust,ignore
/// #[mhs_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
///
/// [`RuntimeConfig`]: https://docs.rs/mhs-runtime
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines an API data transfer object.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` unless already derived.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate's `server` feature is on.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` by default.
///
/// # Arguments
///
/// * `rename_all = "snake_case"` - overrides the rename policy.
/// * `deny_unknown_fields = false` - accepts unknown fields when deserializing.
///
/// # Example
///
/// ```rust,ignore
/// #[mhs_derive::api_model(rename_all = "snake_case")]
/// pub struct ActivityView {
///     pub description: String,
///     pub max_participants: u32,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with the `OpenAPI` document.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `path = "..."`,
/// `params(...)`, `responses(...)`, `tag = ...`) and forwards them when the
/// `server` feature of the consuming crate is enabled.
///
/// # Example
///
/// ```rust,ignore
/// #[mhs_derive::api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = SYSTEM_TAG,
/// )]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a domain error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant wrapping a source error.
/// * `From<Source>` for every variant with a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant wrapping a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[mhs_derive::mhs_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn mhs_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Declares a feature slice handle.
///
/// `struct Activities { catalog: ActivityCatalog }` expands into:
/// 1. `ActivitiesInner` holding the fields,
/// 2. `Activities`, an `Arc<ActivitiesInner>` handle that derefs to the inner state,
/// 3. `FeatureSlice` for kernel registration and `From<Activities> for InitializedSlice`.
///
/// # Example
/// ```rust,ignore
/// #[mhs_derive::mhs_slice]
/// pub struct Activities {
///     pub catalog: ActivityCatalog,
/// }
///
/// let slice = Activities::new(ActivitiesInner { catalog: ActivityCatalog::seeded()? });
/// ```
#[proc_macro_attribute]
pub fn mhs_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
