//! Typed views over the opaque items
//!
//! Only the fields used for display are modelled; everything else stays in
//! the raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for RepositorySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<40} ★{:<7} {:<12} {}",
            self.full_name,
            self.stargazers_count,
            self.language.as_deref().unwrap_or("-"),
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// One entry of a commit listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
    pub commit: CommitDetail,
}

/// The git-level commit data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

/// Author signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl CommitSummary {
    /// First line of the commit message
    pub fn headline(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }

    /// Abbreviated SHA
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

impl std::fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (author, date) = match &self.commit.author {
            Some(author) => (
                author.name.as_str(),
                author
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            None => ("-", String::new()),
        };
        write!(
            f,
            "{} {:<10} {:<20} {}",
            self.short_sha(),
            date,
            author,
            self.headline()
        )
    }
}
