//! API client

use super::endpoints::{ApiSettings, CommitFilter, RepoRef, RepoSearch};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{FetchOutcome, PaginatedFetcher};
use crate::resource::{fetch_resource, ResourceOutcome};
use tracing::info;

/// Client for the repository API
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    settings: ApiSettings,
}

impl ApiClient {
    /// Create a client
    pub fn new(settings: ApiSettings, http_config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(http_config)?,
            settings,
        })
    }

    /// Search repositories, following pages up to the configured ceiling
    pub async fn search_repositories(&self, search: &RepoSearch) -> FetchOutcome {
        info!("Searching repositories: {}", search.query);
        let request = match self.settings.search_request(search) {
            Ok(request) => request,
            Err(e) => return FetchOutcome::failed(Vec::new(), e, 0),
        };

        PaginatedFetcher::new(&self.http, self.settings.search_pagination())
            .fetch_all(&request)
            .await
    }

    /// List commits of a repository, newest first
    pub async fn list_commits(&self, repo: &RepoRef, filter: &CommitFilter) -> FetchOutcome {
        info!("Listing commits of {}", repo);
        let request = match self.settings.commits_request(repo, filter) {
            Ok(request) => request,
            Err(e) => return FetchOutcome::failed(Vec::new(), e, 0),
        };

        PaginatedFetcher::new(&self.http, self.settings.listing_pagination())
            .fetch_all(&request)
            .await
    }

    /// Fetch one file's content
    pub async fn file_content(
        &self,
        repo: &RepoRef,
        path: &str,
        git_ref: Option<&str>,
    ) -> ResourceOutcome {
        info!("Fetching {} from {}", path, repo);
        match self.settings.content_request(repo, path, git_ref) {
            Ok(request) => fetch_resource(&self.http, &request).await,
            Err(e) => ResourceOutcome::Failed(e),
        }
    }
}
