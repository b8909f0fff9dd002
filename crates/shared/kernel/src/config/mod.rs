use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`MHS__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "MHS";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG_FILE: &str = "server";

/// Custom error type for config loading.
#[mhs_derive::mhs_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: an optional file overlaid by environment variables.
///
/// 1. **Base File**: `path` without extension (e.g. `server` matches `server.toml`,
///    `server.yaml`, ...). Defaults to `server` in the working directory. A missing
///    file is not an error; every setting has a default.
/// 2. **Environment Overrides**: variables prefixed with `MHS__`, nested with double
///    underscores (`MHS__STORAGE__STATIC_DIR` maps to `storage.static_dir`).
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed, or if the merged
/// values do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use mhs_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the process
/// environment when given.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
