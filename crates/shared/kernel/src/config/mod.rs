use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// File looked up (with any supported extension) when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "autofill";
/// Prefix of environment overrides, e.g. `SFA__STORAGE__DATA_DIR`.
pub const ENV_PREFIX: &str = "SFA";

#[sfa_derive::sfa_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file overlaid with `SFA__` environment variables.
///
/// An explicit `path` must exist. Without one, `autofill.{toml,json,yaml,..}` in the working
/// directory is used if present, otherwise only defaults and the environment apply.
/// Nested keys use double underscores: `SFA__PATTERNS__IO_TIMEOUT_MS=2000`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a file cannot be parsed,
/// or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use sfa_kernel::config::load_config;
/// use sfa_domain::config::AppConfig;
///
/// let config: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// assert!(config.patterns.io_timeout_ms > 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Like [`load_config`], reading overrides from `vars` instead of the process environment
/// when given.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(vars),
        );

    info!(path = %effective_path.display(), required, "Loading configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
