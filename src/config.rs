//! Connection configuration for the Targetprocess instance.
//!
//! Resolution order, first hit wins:
//!
//! 1. `TP_DOMAIN` and `TP_TOKEN` environment variables (both must be set and
//!    non-empty; a partial pair falls through to the file).
//! 2. A `tp-mcp.json` file next to the installed executable, shape
//!    `{ "domain": "...", "credentials": { "token": "..." } }`.
//!
//! There is no way to force the file when both env vars are set; env-first
//! is policy.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the Targetprocess domain, e.g. `acme.tpondemand.com`.
pub const ENV_DOMAIN: &str = "TP_DOMAIN";

/// Environment variable holding the Targetprocess access token.
pub const ENV_TOKEN: &str = "TP_TOKEN";

/// Name of the fallback configuration file, resolved next to the executable.
pub const CONFIG_FILE: &str = "tp-mcp.json";

/// Configuration resolution errors. All of these are fatal at startup.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error(
        "No Targetprocess configuration found: set {ENV_DOMAIN} and {ENV_TOKEN}, or create {path}"
    )]
    #[diagnostic(
        code(tp_mcp::config::not_configured),
        help(
            "Either export both environment variables, or write a JSON file of the shape {{\"domain\": \"acme.tpondemand.com\", \"credentials\": {{\"token\": \"...\"}}}}."
        )
    )]
    NotConfigured { path: String },

    #[error("Failed to read configuration file {path}")]
    #[diagnostic(code(tp_mcp::config::unreadable))]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration file {path}: {message}")]
    #[diagnostic(
        code(tp_mcp::config::malformed),
        help("The file must be a JSON object. Fix the syntax error or delete the file and use environment variables.")
    )]
    Malformed { path: String, message: String },

    #[error("Configuration file {path} is missing credentials.token")]
    #[diagnostic(
        code(tp_mcp::config::missing_token),
        help("Add a non-empty \"credentials\": {{\"token\": \"...\"}} entry.")
    )]
    MissingToken { path: String },

    #[error("No Targetprocess domain configured: set \"domain\" in {path} or the {ENV_DOMAIN} environment variable")]
    #[diagnostic(code(tp_mcp::config::missing_domain))]
    MissingDomain { path: String },
}

/// Access credentials for the Targetprocess REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
}

/// Validated connection configuration.
///
/// Both fields are guaranteed non-empty once construction succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub domain: String,
    pub credentials: Credentials,
}

/// Raw shape of the configuration file before validation.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    domain: Option<String>,
    credentials: Option<FileCredentials>,
}

#[derive(Debug, Deserialize)]
struct FileCredentials {
    token: Option<String>,
}

impl Config {
    /// Resolve configuration from the environment, falling back to the file.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(config) = Self::from_env() {
            return Ok(config);
        }
        Self::load_file(&Self::default_file_path())
    }

    /// Build configuration from `TP_DOMAIN`/`TP_TOKEN` if both are usable.
    fn from_env() -> Option<Self> {
        let domain = env::var(ENV_DOMAIN).ok().filter(|v| !v.is_empty())?;
        let token = env::var(ENV_TOKEN).ok().filter(|v| !v.is_empty())?;
        Some(Self {
            domain,
            credentials: Credentials { token },
        })
    }

    /// Path of the fallback file, next to the running executable so that
    /// resolution does not depend on the caller's working directory.
    pub fn default_file_path() -> PathBuf {
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE)
    }

    /// Load and validate configuration from a JSON file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotConfigured { path: shown });
            }
            Err(e) => {
                return Err(ConfigError::Unreadable {
                    path: shown,
                    source: e,
                });
            }
        };

        let file: ConfigFile =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Malformed {
                path: shown.clone(),
                message: e.to_string(),
            })?;

        let token = file
            .credentials
            .and_then(|c| c.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingToken {
                path: shown.clone(),
            })?;

        let domain = file
            .domain
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::MissingDomain { path: shown })?;

        Ok(Self {
            domain,
            credentials: Credentials { token },
        })
    }
}
