//! Endpoint descriptors
//!
//! Turns API settings and call parameters into [`RequestDescriptor`]s.

use crate::auth::{AuthConfig, Authenticator};
use crate::decode::ItemsLocation;
use crate::error::{Error, Result};
use crate::http::RequestDescriptor;
use crate::pagination::PaginationConfig;
use crate::types::{SortOrder, StringMap};
use chrono::{DateTime, SecondsFormat, Utc};
use std::str::FromStr;
use url::Url;

/// Public GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Media type pinned by every request
pub const DEFAULT_ACCEPT: &str = "application/vnd.github+json";

/// Header pinning the API revision
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// API revision sent by default
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Configuration shared by every API call
#[derive(Debug, Clone)]
pub struct ApiSettings {
    base_url: Url,
    /// Credential
    pub auth: AuthConfig,
    /// `Accept` header value
    pub accept: String,
    /// API revision header value (empty = not sent)
    pub api_version: String,
    /// Page size, page ceiling and missing-collection policy
    pub pagination: PaginationConfig,
}

impl ApiSettings {
    /// Create settings for a base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{base_url}' cannot be used as a base URL"),
            ));
        }

        Ok(Self {
            base_url,
            auth: AuthConfig::None,
            accept: DEFAULT_ACCEPT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            pagination: PaginationConfig::default(),
        })
    }

    /// Set the credential
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Set pagination limits
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers sent with every call
    pub fn headers(&self) -> StringMap {
        let mut headers = Authenticator::new(self.auth.clone()).headers();
        headers.insert("Accept".to_string(), self.accept.clone());
        if !self.api_version.is_empty() {
            headers.insert(API_VERSION_HEADER.to_string(), self.api_version.clone());
        }
        headers
    }

    /// Absolute URL for a path below the base URL; each segment is escaped
    pub fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "cannot be used as a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    /// Request for `GET /search/repositories`
    pub fn search_request(&self, search: &RepoSearch) -> Result<RequestDescriptor> {
        Ok(RequestDescriptor::new(self.endpoint(["search", "repositories"])?)
            .headers(&self.headers())
            .query("q", &search.query)
            .query_opt("sort", search.sort.as_deref())
            .query_opt("order", search.order.map(SortOrder::as_str)))
    }

    /// Pagination for search responses
    pub fn search_pagination(&self) -> PaginationConfig {
        self.pagination
            .clone()
            .with_items(ItemsLocation::field("items"))
    }

    /// Request for `GET /repos/{owner}/{repo}/commits`
    pub fn commits_request(&self, repo: &RepoRef, filter: &CommitFilter) -> Result<RequestDescriptor> {
        let url = self.endpoint(["repos", repo.owner.as_str(), repo.name.as_str(), "commits"])?;
        Ok(RequestDescriptor::new(url)
            .headers(&self.headers())
            .query_opt("sha", filter.sha.as_deref())
            .query_opt("path", filter.path.as_deref())
            .query_opt("author", filter.author.as_deref())
            .query_opt("since", filter.since.map(iso8601))
            .query_opt("until", filter.until.map(iso8601)))
    }

    /// Pagination for listing responses
    pub fn listing_pagination(&self) -> PaginationConfig {
        self.pagination.clone().with_items(ItemsLocation::TopLevel)
    }

    /// Request for `GET /repos/{owner}/{repo}/contents/{path}`
    pub fn content_request(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<RequestDescriptor> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(Error::invalid_value("path", "file path is empty"));
        }

        let segments = ["repos", repo.owner.as_str(), repo.name.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/'));
        Ok(RequestDescriptor::new(self.endpoint(segments)?)
            .headers(&self.headers())
            .query_opt("ref", git_ref))
    }
}

fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `owner/name` reference to a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create a reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::invalid_value(
                "repository",
                format!("expected 'owner/name', got '{s}'"),
            )),
        }
    }
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository search parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSearch {
    /// Free-text query with qualifiers (e.g. `language:rust stars:>1000`)
    pub query: String,
    /// Sort key (`stars`, `forks`, `updated`, ...)
    pub sort: Option<String>,
    /// Sort direction
    pub order: Option<SortOrder>,
}

impl RepoSearch {
    /// Search for a query with the API's default ordering
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Sort by a key in a direction
    #[must_use]
    pub fn sorted_by(mut self, sort: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(sort.into());
        self.order = Some(order);
        self
    }
}

/// Commit history filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFilter {
    /// Branch name or commit SHA to start listing from
    pub sha: Option<String>,
    /// Only commits touching this path
    pub path: Option<String>,
    /// Only commits by this author (login or email)
    pub author: Option<String>,
    /// Only commits after this instant
    pub since: Option<DateTime<Utc>>,
    /// Only commits before this instant
    pub until: Option<DateTime<Utc>>,
}
