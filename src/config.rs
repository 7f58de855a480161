//! Configuration file
//!
//! Settings are read from an optional YAML file. Every field has a default,
//! so an empty file (or no file) is a valid configuration. The credential is
//! never stored in the file; it is read from the environment variable named
//! by `token_env`.

use crate::api::{ApiSettings, DEFAULT_ACCEPT, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::auth::{AuthConfig, AuthScheme};
use crate::decode::MissingItems;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PaginationConfig;
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete settings loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base URL for API requests
    pub base_url: String,

    /// Environment variable holding the access token
    pub token_env: String,

    /// How the token is presented
    pub auth_scheme: AuthScheme,

    /// `Accept` header value
    pub accept: String,

    /// API revision header value
    pub api_version: String,

    /// HTTP client configuration
    pub http: HttpSettings,

    /// Pagination limits
    pub pagination: PaginationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            auth_scheme: AuthScheme::Bearer,
            accept: DEFAULT_ACCEPT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            http: HttpSettings::default(),
            pagination: PaginationSettings::default(),
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retries for transient failures (0 = stop on first failure)
    pub max_retries: u32,

    /// Backoff strategy between retries
    pub backoff: BackoffType,

    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Backoff ceiling in milliseconds
    pub max_backoff_ms: u64,

    /// Optional client-side pacing
    pub requests_per_second: Option<u32>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 0,
            backoff: BackoffType::Exponential,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
            requests_per_second: None,
        }
    }
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationSettings {
    /// Items per page
    pub per_page: u32,

    /// Page ceiling (`null` = no ceiling)
    pub max_pages: Option<u32>,

    /// Policy for a page without an item collection
    pub on_missing_items: MissingItems,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_pages: Some(10),
            on_missing_items: MissingItems::Stop,
        }
    }
}

impl Settings {
    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Check values the API would reject
    pub fn validate(&self) -> Result<()> {
        if self.pagination.per_page == 0 || self.pagination.per_page > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "pagination.per_page",
                format!(
                    "must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    self.pagination.per_page
                ),
            ));
        }

        if self.pagination.max_pages == Some(0) {
            return Err(Error::invalid_value(
                "pagination.max_pages",
                "must be positive (use null for no ceiling)",
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be positive"));
        }

        if self.token_env.trim().is_empty() {
            return Err(Error::invalid_value("token_env", "must not be empty"));
        }

        // Surfaces URL errors before any request is built
        ApiSettings::new(&self.base_url)?;
        Ok(())
    }

    /// Read the token from the configured environment variable
    pub fn token_from_env(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().none_if_empty()
    }

    /// Build the auth config for an optional token
    pub fn auth(&self, token: Option<String>) -> AuthConfig {
        match token.none_if_empty() {
            Some(token) => AuthConfig::with_scheme(self.auth_scheme, token),
            None => AuthConfig::None,
        }
    }

    /// Build the pagination config
    pub fn pagination_config(&self) -> PaginationConfig {
        PaginationConfig::new()
            .with_page_size(self.pagination.per_page)
            .with_max_pages(self.pagination.max_pages)
            .with_on_missing(self.pagination.on_missing_items)
    }

    /// Build the HTTP client config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff,
                Duration::from_millis(self.http.initial_backoff_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            );

        if let Some(rps) = self.http.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::new(rps, rps));
        }

        builder.build()
    }

    /// Build the API settings for a credential
    pub fn api_settings(&self, auth: AuthConfig) -> Result<ApiSettings> {
        let mut settings = ApiSettings::new(&self.base_url)?
            .with_auth(auth)
            .with_pagination(self.pagination_config());
        settings.accept = self.accept.clone();
        settings.api_version = self.api_version.clone();
        Ok(settings)
    }
}
