//! Response decoding module
//!
//! Locates the item collection inside a page body and decodes the
//! `content` payload of single-resource responses.
//!
//! # Overview
//!
//! Search responses carry their results under a named field (`items`),
//! listing responses are top-level arrays. File content responses declare
//! their payload encoding next to the payload itself.

mod decoders;
mod types;

pub use decoders::{decode_content, extract_items};
pub use types::{ItemsLocation, MissingItems, PageItems};
