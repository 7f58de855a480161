//! CLI runner - executes commands

use crate::api::{ApiClient, CommitFilter, CommitSummary, RepoRef, RepoSearch, RepositorySummary};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::pagination::FetchOutcome;
use crate::resource::{Resource, ResourceOutcome};
use crate::types::OptionStringExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.settings()?;
        let client = self.client(&settings)?;

        match &self.cli.command {
            Commands::Search { query, sort, order } => {
                let mut search = RepoSearch::new(query.as_str());
                search.sort = sort.clone().none_if_empty();
                search.order = *order;

                let outcome = client.search_repositories(&search).await;
                self.write_items::<RepositorySummary>(&mut std::io::stdout().lock(), &outcome.items)?;
                Self::finish("search", outcome)
            }
            Commands::Commits {
                repo,
                sha,
                path,
                author,
                since,
                until,
            } => {
                let repo = RepoRef::parse(repo)?;
                let filter = CommitFilter {
                    sha: sha.clone().none_if_empty(),
                    path: path.clone().none_if_empty(),
                    author: author.clone().none_if_empty(),
                    since: *since,
                    until: *until,
                };

                let outcome = client.list_commits(&repo, &filter).await;
                self.write_items::<CommitSummary>(&mut std::io::stdout().lock(), &outcome.items)?;
                Self::finish("commits", outcome)
            }
            Commands::Content {
                repo,
                path,
                git_ref,
            } => {
                let repo = RepoRef::parse(repo)?;
                let outcome = client
                    .file_content(&repo, path, git_ref.as_deref())
                    .await;

                let target = format!("{repo}:{path}");
                match outcome {
                    ResourceOutcome::Found(resource) => {
                        self.write_resource(&mut std::io::stdout().lock(), &resource)
                    }
                    other => other.into_result(&target).map(|_| ()),
                }
            }
        }
    }

    /// Load settings and apply command-line overrides
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(base_url) = self.cli.base_url.clone().none_if_empty() {
            settings.base_url = base_url;
        }
        if let Some(per_page) = self.cli.per_page {
            settings.pagination.per_page = per_page;
        }
        if let Some(max_pages) = self.cli.max_pages {
            settings.pagination.max_pages = Some(max_pages);
        }
        if self.cli.no_page_limit {
            settings.pagination.max_pages = None;
        }
        if let Some(retries) = self.cli.retries {
            settings.http.max_retries = retries;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Build the API client; the `--token` flag wins over the environment
    fn client(&self, settings: &Settings) -> Result<ApiClient> {
        let token = self
            .cli
            .token
            .clone()
            .none_if_empty()
            .or_else(|| settings.token_from_env());

        if token.is_none() {
            debug!(
                "No token in --token or ${}, sending anonymous requests",
                settings.token_env
            );
        }

        let api = settings.api_settings(settings.auth(token))?;
        ApiClient::new(api, settings.http_config())
    }

    /// Log the terminal status and surface a failure as an error
    fn finish(operation: &str, outcome: FetchOutcome) -> Result<()> {
        info!(
            "{}: {} items in {} requests, {}",
            operation,
            outcome.len(),
            outcome.requests,
            outcome.status
        );

        match outcome.into_parts() {
            (_, Some(e)) => Err(e),
            (_, None) => Ok(()),
        }
    }

    /// Write items in the selected format
    ///
    /// Pretty output goes through the typed summary `T`; items that do not
    /// fit the model fall back to their JSON form.
    pub fn write_items<T: DeserializeOwned + Display>(
        &self,
        out: &mut impl Write,
        items: &[Value],
    ) -> Result<()> {
        for item in items {
            match self.cli.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(item)?)?,
                OutputFormat::Pretty => match serde_json::from_value::<T>(item.clone()) {
                    Ok(summary) => writeln!(out, "{summary}")?,
                    Err(_) => writeln!(out, "{}", serde_json::to_string_pretty(item)?)?,
                },
            }
        }
        Ok(())
    }

    /// Write a fetched file
    ///
    /// JSON output is the API body; pretty output is the decoded text.
    pub fn write_resource(&self, out: &mut impl Write, resource: &Resource) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string(&resource.body)?)?;
            }
            OutputFormat::Pretty => match resource.text() {
                Some(text) => write!(out, "{}", text?)?,
                None => {
                    return Err(Error::decode(format!(
                        "'{}' has no inline content (is it a directory?)",
                        resource.field("path").unwrap_or("resource")
                    )))
                }
            },
        }
        Ok(())
    }
}
