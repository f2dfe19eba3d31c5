//! Configuration management for the Pitstock server

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use utoipa::ToSchema;

/// Documented placeholder values shipped in the default configuration.
/// Values equal to these are treated as "not configured".
pub const PLACEHOLDER_URL: &str = "https://your-project-id.supabase.co";
pub const PLACEHOLDER_ANON_KEY: &str = "your-anon-key-here";

/// Anon keys are JWTs; anything shorter than this cannot be one. This is a
/// coarse well-formedness check, not authentication.
const MIN_ANON_KEY_LEN: usize = 50;

static HOSTED_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://[a-z0-9-]+\.supabase\.co/?$").expect("valid regex"));

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the local record store files
    pub data_dir: String,
}

/// Remote backend (Supabase) connection settings.
///
/// Also the shape persisted in the record store under the backend-config key
/// when the operator saves settings through the API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, ToSchema)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
    /// Elevated-privilege key, kept for operator tooling; plays no part in
    /// backend selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_role_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

impl RemoteConfig {
    /// Backend selector: true iff the remote backend should be used.
    ///
    /// Requires a real-looking hosted-service URL (present, not the
    /// placeholder, on the expected domain) and a plausible anon key
    /// (present, not the placeholder, longer than the JWT floor). Any single
    /// failing condition means the local store is used instead. Side-effect
    /// free and safe to call on every reconfiguration.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
            && self.url != PLACEHOLDER_URL
            && HOSTED_URL_RE.is_match(&self.url)
            && !self.anon_key.is_empty()
            && self.anon_key != PLACEHOLDER_ANON_KEY
            && self.anon_key.len() > MIN_ANON_KEY_LEN
    }

    /// Validation for operator-supplied settings, mirroring what
    /// `is_configured` checks but reporting every failing condition.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.url.is_empty() {
            errors.push("backend URL is required".to_string());
        } else if !HOSTED_URL_RE.is_match(&self.url) {
            errors.push(format!(
                "backend URL must look like {}",
                PLACEHOLDER_URL
            ));
        }
        if self.anon_key.is_empty() {
            errors.push("anon key is required".to_string());
        } else if self.anon_key.len() <= MIN_ANON_KEY_LEN {
            errors.push("anon key is too short to be valid".to_string());
        }
        errors
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: PLACEHOLDER_URL.to_string(),
            anon_key: PLACEHOLDER_ANON_KEY.to_string(),
            service_role_key: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// `SUPABASE_URL` / `SUPABASE_ANON_KEY` / `SUPABASE_SERVICE_ROLE_KEY`
    /// override the file values, but only when they differ from the
    /// documented placeholders, so a copied-over sample `.env` does not count
    /// as a configured backend.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix PITSTOCK_)
            .add_source(
                Environment::with_prefix("PITSTOCK")
                    .separator("_")
                    .try_parsing(true),
            )
            .set_override_option(
                "remote.url",
                env::var("SUPABASE_URL")
                    .ok()
                    .filter(|v| !v.is_empty() && v != PLACEHOLDER_URL),
            )?
            .set_override_option(
                "remote.anon_key",
                env::var("SUPABASE_ANON_KEY")
                    .ok()
                    .filter(|v| !v.is_empty() && v != PLACEHOLDER_ANON_KEY),
            )?
            .set_override_option(
                "remote.service_role_key",
                env::var("SUPABASE_SERVICE_ROLE_KEY").ok().filter(|v| !v.is_empty()),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
