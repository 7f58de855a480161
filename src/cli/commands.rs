//! CLI commands and argument parsing

use crate::types::SortOrder;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Browse repositories, commits and files over the GitHub REST API
#[derive(Parser, Debug)]
#[command(name = "repo-scout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Access token (overrides the token environment variable)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Items per page (1-100)
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Maximum number of pages to request
    #[arg(long, global = true, conflicts_with = "no_page_limit")]
    pub max_pages: Option<u32>,

    /// Follow pages until the API runs out of data
    #[arg(long, global = true)]
    pub no_page_limit: bool,

    /// Retries for transient failures
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter for a `RUST_LOG` value.
    ///
    /// A non-empty `RUST_LOG` is used as given. Otherwise the level is
    /// `debug` with `--verbose` and `info` without.
    pub fn log_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        let level = if self.verbose { Level::DEBUG } else { Level::INFO };
        EnvFilter::builder()
            .with_default_directive(level.into())
            .parse_lossy(rust_log.unwrap_or_default().trim())
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repositories
    Search {
        /// Search query with qualifiers (e.g. "language:rust stars:>1000")
        query: String,

        /// Sort key (stars, forks, help-wanted-issues, updated)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction
        #[arg(long, requires = "sort")]
        order: Option<SortOrder>,
    },

    /// List commits of a repository
    Commits {
        /// Repository as owner/name
        repo: String,

        /// Branch name or commit SHA to start from
        #[arg(long)]
        sha: Option<String>,

        /// Only commits touching this path
        #[arg(long)]
        path: Option<String>,

        /// Only commits by this author (login or email)
        #[arg(long)]
        author: Option<String>,

        /// Only commits after this instant (RFC 3339)
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// Only commits before this instant (RFC 3339)
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },

    /// Print the content of one file
    Content {
        /// Repository as owner/name
        repo: String,

        /// File path inside the repository
        path: String,

        /// Branch, tag or commit (default branch if omitted)
        #[arg(long = "ref")]
        git_ref: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
