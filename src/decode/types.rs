//! Decoder types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the item collection lives in a page body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemsLocation {
    /// The body itself is the array
    #[default]
    TopLevel,
    /// The array lives under this field of a JSON object
    Field(String),
}

impl ItemsLocation {
    /// Items under a named field
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Human-readable description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::TopLevel => "top-level array".to_string(),
            Self::Field(name) => format!("field '{name}'"),
        }
    }
}

/// What to do when a page has no item collection at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItems {
    /// Treat it like an empty page (end of data)
    #[default]
    Stop,
    /// Treat it as a malformed response
    Fail,
}

/// Items located in one page body
#[derive(Debug, Clone, PartialEq)]
pub enum PageItems {
    /// The collection was present (possibly empty)
    Items(Vec<Value>),
    /// The collection was absent or null
    Missing,
}

impl PageItems {
    /// Number of items (0 when missing)
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Missing => 0,
        }
    }

    /// True when there is nothing to accumulate
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
