//! Pagination module
//!
//! Page-number pagination over a listing endpoint.
//!
//! # Overview
//!
//! [`PaginatedFetcher`] requests page 1, 2, 3, ... in sequence and
//! concatenates the items of every successful page. It stops on an empty
//! page, at the configured page ceiling, or on the first failed request, and
//! reports which of these happened through [`FetchStatus`].

mod fetcher;
mod types;

pub use fetcher::PaginatedFetcher;
pub use types::{FetchOutcome, FetchStatus, PageResult, PaginationConfig, PaginationState};
