//! Authenticator implementation
//!
//! Renders an [`AuthConfig`] into request headers.

use super::types::AuthConfig;
use crate::types::StringMap;

/// Authorization header name
pub const AUTHORIZATION: &str = "Authorization";

/// Authenticator turns auth configuration into a header mapping
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Headers to attach to every request
    pub fn headers(&self) -> StringMap {
        let mut headers = StringMap::new();

        match &self.config {
            AuthConfig::None => {}

            AuthConfig::Bearer { token } => {
                headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
            }

            AuthConfig::Token { token } => {
                headers.insert(AUTHORIZATION.to_string(), format!("token {token}"));
            }
        }

        headers
    }
}
