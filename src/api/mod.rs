//! Repository API operations
//!
//! The three calls this crate is built around:
//!
//! - repository search (`GET /search/repositories`, items under `items`)
//! - commit history (`GET /repos/{owner}/{repo}/commits`, top-level array)
//! - file content (`GET /repos/{owner}/{repo}/contents/{path}`)
//!
//! [`ApiSettings`] is the explicit configuration value every call receives:
//! base URL, credential, content negotiation and pagination limits.

mod client;
mod endpoints;
mod models;

pub use client::ApiClient;
pub use endpoints::{
    ApiSettings, CommitFilter, RepoRef, RepoSearch, API_VERSION_HEADER, DEFAULT_ACCEPT,
    DEFAULT_API_VERSION, DEFAULT_BASE_URL,
};
pub use models::{CommitAuthor, CommitDetail, CommitSummary, RepositorySummary};
