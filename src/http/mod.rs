//! HTTP client module
//!
//! Provides the transport used by every fetch: one GET at a time, with
//! status classification, optional client-side pacing and opt-in retries.
//!
//! # Features
//!
//! - **Status Classification**: 401/403/404 and other failures map onto [`crate::error::FailureKind`]
//! - **Rate Limiting**: Optional token bucket pacing using governor
//! - **Retries**: Off by default; when enabled only transient failures are retried

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RateLimitStatus, RequestDescriptor,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
