//! Paginated fetcher
//!
//! Walks a page-numbered listing one request at a time and accumulates the
//! items. The fetch ends on the first empty page, at the page ceiling, or on
//! the first failed request.

use super::types::{FetchOutcome, FetchStatus, PageResult, PaginationConfig, PaginationState};
use crate::decode::{extract_items, MissingItems, PageItems};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestDescriptor};
use tracing::{debug, info, warn};

/// Sequential page-number fetcher
#[derive(Debug)]
pub struct PaginatedFetcher<'a> {
    client: &'a HttpClient,
    config: PaginationConfig,
}

impl<'a> PaginatedFetcher<'a> {
    /// Create a fetcher over a client
    pub fn new(client: &'a HttpClient, config: PaginationConfig) -> Self {
        Self { client, config }
    }

    /// Fetch one page of the listing described by `request`
    pub async fn fetch_page(&self, request: &RequestDescriptor, page: u32) -> Result<PageResult> {
        let page_request = request
            .clone()
            .query(&self.config.page_param, page)
            .query(&self.config.page_size_param, self.config.page_size);

        let body = self.client.get_json(&page_request).await?;
        let items = extract_items(body, &self.config.items)?;

        Ok(PageResult { page, items })
    }

    /// Fetch pages until the listing is exhausted, the ceiling is hit, or a
    /// request fails.
    ///
    /// Never returns an error: failures are reported through
    /// [`FetchOutcome::status`] together with the items gathered so far.
    pub async fn fetch_all(&self, request: &RequestDescriptor) -> FetchOutcome {
        let mut state = PaginationState::with_page(self.config.start_page);
        let mut items = Vec::new();

        loop {
            if state.limit_reached(self.config.max_pages) {
                return self.finish(request, items, FetchStatus::StoppedLimit, &state);
            }

            state.record_request();
            let page = state.page;

            let result = match self.fetch_page(request, page).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(
                        "Fetch of {} failed on page {} ({}): {}",
                        request.url,
                        page,
                        e.kind(),
                        e
                    );
                    return FetchOutcome::failed(items, e, state.requests);
                }
            };

            match result.items {
                PageItems::Items(page_items) if !page_items.is_empty() => {
                    debug!("Page {}: fetched {} items", page, page_items.len());
                    state.add_fetched(page_items.len());
                    items.extend(page_items);
                }
                PageItems::Items(_) => {
                    debug!("Page {}: empty", page);
                    return self.finish(request, items, self.end_of_data(), &state);
                }
                PageItems::Missing => match self.config.on_missing {
                    MissingItems::Stop => {
                        warn!(
                            "Page {} of {} has no {}, treating as end of data",
                            page,
                            request.url,
                            self.config.items.describe()
                        );
                        return self.finish(request, items, self.end_of_data(), &state);
                    }
                    MissingItems::Fail => {
                        let error = Error::decode(format!(
                            "Page {page} has no {}",
                            self.config.items.describe()
                        ));
                        warn!("Fetch of {} failed: {}", request.url, error);
                        return FetchOutcome::failed(items, error, state.requests);
                    }
                },
            }

            if !state.next_page() {
                return self.finish(request, items, FetchStatus::StoppedLimit, &state);
            }
        }
    }

    /// Status for a page that ended the listing
    fn end_of_data(&self) -> FetchStatus {
        if self.config.max_pages.is_some() {
            FetchStatus::StoppedEmpty
        } else {
            FetchStatus::Complete
        }
    }

    fn finish(
        &self,
        request: &RequestDescriptor,
        items: Vec<serde_json::Value>,
        status: FetchStatus,
        state: &PaginationState,
    ) -> FetchOutcome {
        info!(
            "Fetch of {} {}: {} items in {} requests",
            request.url, status, state.total_fetched, state.requests
        );
        FetchOutcome::stopped(items, status, state.requests)
    }
}
