//! Auth feature module: the identity provider and registration seams, their
//! HTTP clients and the wire types. This module touches security boundaries and
//! must avoid logging secrets.
//!
//! Flow Overview: login signs in through the provider's credentials callback
//! (or starts the Google redirect); registration posts one JSON document. The
//! provider owns the session; this crate only learns whether a call worked.

pub mod client;
pub mod provider;
pub mod types;

pub use client::{HttpRegistration, NextAuthClient};
pub use provider::{RegistrationEndpoint, SignIn};
pub use types::{Credentials, Provider, RegisterRequest, SignInParams, SignInResponse};

/// Substring the identity provider puts in its error when the account's email
/// is not verified yet. Matched verbatim; changing it breaks the provider
/// contract.
// TODO: switch to a structured error code once the provider exposes one.
pub const EMAIL_NOT_VERIFIED_MARKER: &str = "EmailNotVerified";

/// `error` query value the provider appends when credentials sign-in fails on
/// its own sign-in page.
pub const CREDENTIALS_SIGNIN_ERROR: &str = "CredentialsSignin";
