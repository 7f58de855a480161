//! Authentication module
//!
//! Supports: Bearer token and the legacy `token` scheme
//!
//! Authentication is rendered into an explicit header mapping that callers
//! attach to every request descriptor. Nothing here is cached between calls.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, AuthScheme};
