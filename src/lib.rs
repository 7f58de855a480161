// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # repo-scout
//!
//! A client for a rate-limited, paged REST API (GitHub's v3 REST API by
//! default): repository search, commit history and file content.
//!
//! ## Features
//!
//! - **Paginated fetch**: follows page-number pagination up to a ceiling and
//!   keeps every item gathered before a failure
//! - **Failure taxonomy**: auth failure, rate limited, not found, other HTTP
//!   error and transport error are reported distinctly
//! - **Single resource fetch**: one GET with inline base64 content decoded
//! - **Explicit credentials**: auth headers are passed with each call, never
//!   held in global state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use repo_scout::api::{ApiClient, ApiSettings, RepoSearch, RepositorySummary};
//! use repo_scout::auth::AuthConfig;
//! use repo_scout::http::HttpClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> repo_scout::Result<()> {
//!     let settings = ApiSettings::new("https://api.github.com")?
//!         .with_auth(AuthConfig::Bearer { token: std::env::var("GITHUB_TOKEN").unwrap() });
//!     let client = ApiClient::new(settings, HttpClientConfig::default())?;
//!
//!     let outcome = client
//!         .search_repositories(&RepoSearch::new("language:rust stars:>1000"))
//!         .await;
//!
//!     for repo in outcome.items_as::<RepositorySummary>()? {
//!         println!("{repo}");
//!     }
//!
//!     // Partial results survive a failure
//!     if let Some(e) = outcome.error {
//!         eprintln!("stopped early ({}): {e}", outcome.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          ApiClient                          │
//! │  search_repositories()   list_commits()   file_content()    │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                                   │
//!        ┌────────┴─────────┐                ┌────────┴────────┐
//!        │ PaginatedFetcher │                │  fetch_resource │
//!        └────────┬─────────┘                └────────┬────────┘
//!                 │                                   │
//! ┌──────────┬────┴──────┬───────────────┬────────────┴────────┐
//! │   Auth   │   HTTP    │    Decode     │        Error        │
//! ├──────────┼───────────┼───────────────┼─────────────────────┤
//! │ Bearer   │ GET       │ Item arrays   │ AuthFailure         │
//! │ Token    │ Retry     │ Base64 content│ RateLimited         │
//! │          │ Rate Limit│               │ NotFound            │
//! │          │ Backoff   │               │ HttpError/Transport │
//! └──────────┴───────────┴───────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and failure classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication header construction
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Item extraction and content decoding
pub mod decode;

/// Page-number pagination
pub mod pagination;

/// Single resource fetch
pub mod resource;

/// Endpoints, client and models for the repository API
pub mod api;

/// Settings file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FailureKind, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{ApiClient, ApiSettings, RepoRef};
pub use config::Settings;
pub use pagination::{FetchOutcome, FetchStatus, PaginatedFetcher, PaginationConfig};
pub use resource::{fetch_resource, Resource, ResourceOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
