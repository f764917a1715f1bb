//! Login and registration form core.
//!
//! The crate holds the client-side half of an email/password sign-in and
//! sign-up experience: field validation as the user types, password strength
//! scoring, a submission state machine that allows one external call at a
//! time, and the mapping of provider answers onto a single user notice. The
//! identity provider, the registration endpoint, navigation and message lookup
//! are traits so hosts can plug in their own.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod cli;
pub mod components;
pub mod features;
pub mod routes;
