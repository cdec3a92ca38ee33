//! Configuration loader
//!
//! Loads the bridge configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from a probed file
//! 3. Supports JSON and TOML formats
//! 4. Whatever the source, the result is validated and the loader fails
//!    closed on missing values, placeholders or malformed URLs
//!
//! ## Environment Variables
//! - `ODOO_URL`: Base URL of the Odoo instance (required)
//! - `ODOO_DB`: Odoo database name (required)
//! - `ODOO_USERNAME`: Integration user login (required)
//! - `ODOO_PASSWORD`: Integration user password or API key (required)
//! - `API_KEY`: Shared secret expected in the `x-api-key` header (required)
//! - `ODOO_TIMEOUT_SECS`: Per-request timeout (default 30)
//! - `ODOO_COMPANY_ID`: Company assigned to new lots (default 1)
//! - `MESBRIDGE_BIND_ADDR`: Listen address (default `0.0.0.0:8000`)
//! - `MESBRIDGE_LOG_FORMAT`: `pretty` or `json` (default `pretty`)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./mesbridge.toml`, `./mesbridge.json`, `./config.toml`, `./config.json`
//! 2. The same names in the parent directory
//! 3. The same names next to the executable

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use mesbridge_domain::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_COMPANY_ID, DEFAULT_ERP_TIMEOUT_SECS, PLACEHOLDER_VALUES,
};
use mesbridge_domain::{
    BridgeError, Config, LogFormat, OdooConfig, Result, Secret, ServerConfig, WebhookConfig,
};
use url::Url;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["mesbridge.toml", "mesbridge.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If that fails and a
/// config file can be found, the file is used instead; otherwise the
/// environment error is returned.
///
/// # Errors
/// Returns `BridgeError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(env_error) => match probe_config_paths() {
            Some(path) => {
                tracing::debug!(error = %env_error, "Environment incomplete, trying file");
                load_from_file(Some(path))
            }
            None => Err(env_error),
        },
    }
}

/// Load configuration from process environment variables
///
/// # Errors
/// Returns `BridgeError::Config` if required variables are missing or any
/// value is invalid.
pub fn load_from_env() -> Result<Config> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary key lookup
///
/// Same rules as [`load_from_env`]; lets callers supply variables without
/// touching the process environment.
///
/// # Errors
/// Returns `BridgeError::Config` if required keys are missing or any value
/// is invalid.
pub fn load_from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).ok_or_else(|| {
            BridgeError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let timeout_secs = match lookup("ODOO_TIMEOUT_SECS") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| BridgeError::Config(format!("Invalid ODOO_TIMEOUT_SECS: {e}")))?,
        None => DEFAULT_ERP_TIMEOUT_SECS,
    };
    let company_id = match lookup("ODOO_COMPANY_ID") {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| BridgeError::Config(format!("Invalid ODOO_COMPANY_ID: {e}")))?,
        None => DEFAULT_COMPANY_ID,
    };
    let log_format = match lookup("MESBRIDGE_LOG_FORMAT") {
        Some(raw) => raw.parse::<LogFormat>().map_err(BridgeError::Config)?,
        None => LogFormat::default(),
    };

    let config = Config {
        server: ServerConfig {
            bind_addr: lookup("MESBRIDGE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            log_format,
        },
        odoo: OdooConfig {
            url: required("ODOO_URL")?,
            database: required("ODOO_DB")?,
            username: required("ODOO_USERNAME")?,
            password: Secret::new(required("ODOO_PASSWORD")?),
            timeout_secs,
            company_id,
        },
        webhook: WebhookConfig { api_key: Secret::new(required("API_KEY")?) },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// by file extension.
///
/// # Errors
/// Returns `BridgeError::Config` if no file is found, the file cannot be
/// read or parsed, or the parsed configuration is invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BridgeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BridgeError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BridgeError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BridgeError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first file that exists, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Reject configurations the bridge must not start with
///
/// # Errors
/// Returns `BridgeError::Config` describing the first problem found.
pub fn validate(config: &Config) -> Result<()> {
    let odoo = &config.odoo;

    let url = Url::parse(odoo.url.trim())
        .map_err(|e| BridgeError::Config(format!("Invalid Odoo URL `{}`: {e}", odoo.url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BridgeError::Config(format!(
            "Odoo URL must use http or https, got `{}`",
            url.scheme()
        )));
    }

    require_value("Odoo database", &odoo.database)?;
    require_value("Odoo username", &odoo.username)?;
    require_value("Odoo URL", odoo.url.trim_end_matches('/'))?;
    require_secret("Odoo password", &odoo.password)?;
    require_secret("webhook API key", &config.webhook.api_key)?;

    if odoo.timeout_secs == 0 {
        return Err(BridgeError::Config("Odoo timeout must be greater than 0".into()));
    }

    config.server.bind_addr.parse::<SocketAddr>().map_err(|e| {
        BridgeError::Config(format!("Invalid bind address `{}`: {e}", config.server.bind_addr))
    })?;

    Ok(())
}

fn require_value(name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BridgeError::Config(format!("{name} must not be empty")));
    }
    if is_placeholder(trimmed) {
        return Err(BridgeError::Config(format!("{name} is still set to a placeholder value")));
    }
    Ok(())
}

fn require_secret(name: &str, secret: &Secret) -> Result<()> {
    require_value(name, secret.expose())
}

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_VALUES.iter().any(|placeholder| placeholder.eq_ignore_ascii_case(value))
}
