//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Scheme used when rendering a personal access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `Authorization: token <token>`
    Token,
}

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// Anonymous access (lowest rate limit)
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Legacy `token` scheme accepted by the GitHub API
    Token {
        /// The access token
        token: String,
    },
}

impl AuthConfig {
    /// Build a token config for the given scheme
    pub fn with_scheme(scheme: AuthScheme, token: impl Into<String>) -> Self {
        let token = token.into();
        match scheme {
            AuthScheme::Bearer => Self::Bearer { token },
            AuthScheme::Token => Self::Token { token },
        }
    }

    /// Whether any credential is configured
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Secrets never reach the logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.write_str("Bearer { token: <redacted> }"),
            Self::Token { .. } => f.write_str("Token { token: <redacted> }"),
        }
    }
}
