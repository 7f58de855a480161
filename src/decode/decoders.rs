//! Decoder implementations

use super::types::{ItemsLocation, PageItems};
use crate::error::{Error, Result};
use base64::Engine as _;
use serde_json::Value;

/// Locate the item collection in a page body.
///
/// An absent or `null` collection is reported as [`PageItems::Missing`];
/// anything else that is not an array is a decode error.
pub fn extract_items(body: Value, location: &ItemsLocation) -> Result<PageItems> {
    let collection = match location {
        ItemsLocation::TopLevel => Some(body),
        ItemsLocation::Field(name) => match body {
            Value::Object(mut map) => map.remove(name),
            other => {
                return Err(Error::decode(format!(
                    "Expected a JSON object with field '{name}', got {}",
                    type_name(&other)
                )))
            }
        },
    };

    match collection {
        None | Some(Value::Null) => Ok(PageItems::Missing),
        Some(Value::Array(items)) => Ok(PageItems::Items(items)),
        Some(other) => Err(Error::decode(format!(
            "Expected an array at {}, got {}",
            location.describe(),
            type_name(&other)
        ))),
    }
}

/// Decode the `content` field of a single-resource body.
///
/// Returns `None` when the body carries no inline content (directories,
/// or files too large to be inlined).
pub fn decode_content(body: &Value) -> Result<Option<Vec<u8>>> {
    let Some(content) = body.get("content").and_then(Value::as_str) else {
        return Ok(None);
    };
    let encoding = body.get("encoding").and_then(Value::as_str);

    match encoding {
        Some("base64") => {
            // The API wraps the payload at 60 columns
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            base64::engine::general_purpose::STANDARD
                .decode(compact)
                .map(Some)
                .map_err(|e| Error::decode(format!("Invalid base64 content: {e}")))
        }
        Some("none") if content.is_empty() => Ok(None),
        None | Some("utf-8" | "utf8") => Ok(Some(content.as_bytes().to_vec())),
        Some(other) => Err(Error::decode(format!(
            "Unsupported content encoding: {other}"
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
