//! Shared utilities for HTTP access, configuration, errors, message lookup and
//! build metadata.
//!
//! ## Submission Flows
//!
//! ### Login
//!
//! 1. **Validate:** email format is checked as the user types; both fields are required.
//! 2. **Sign in:** credentials go to the identity provider's credentials callback
//!    together with a CSRF token fetched from `/api/auth/csrf`.
//! 3. **Redirect:** on success the host navigates to the callback URL.
//!
//! ### Registration
//!
//! 1. **Validate:** email, password strength, confirmation and name on every change.
//! 2. **Register:** one JSON POST to `/api/user/register`.
//! 3. **Redirect:** on any 2xx the host navigates to the localized login page.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids duplicated
//! logic in flows. Callers must still avoid logging sensitive data.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;
pub mod i18n;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::ApiClient;
pub use config::{AppConfig, RuntimeConfig};
pub use errors::AppError;
pub use i18n::{Catalog, KeyEcho, Translate};
