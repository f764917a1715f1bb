//! Page flows and the navigation seam. Paths are localized by prefixing the
//! locale, e.g. `/en/auth/login`.

mod login;
mod register;

pub use login::{LoginField, LoginForm, LoginQuery, LoginSchema, LOGIN_PREFLIGHT};
pub use register::{RegistrationField, RegistrationForm, RegistrationSchema, REGISTER_PREFLIGHT};

use std::sync::Mutex;
use tracing::info;

/// Moves the host to another page.
pub trait Navigate {
    fn navigate(&self, path: &str);
}

/// Records every destination; the last entry is the current page.
#[derive(Debug, Default)]
pub struct NavigationLog {
    visited: Mutex<Vec<String>>,
}

impl NavigationLog {
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigate for NavigationLog {
    fn navigate(&self, path: &str) {
        info!(path, "navigate");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}

pub fn home_path(locale: &str) -> String {
    format!("/{locale}/")
}

pub fn login_path(locale: &str) -> String {
    format!("/{locale}/auth/login")
}

pub fn register_path(locale: &str) -> String {
    format!("/{locale}/auth/register")
}

pub fn forgot_password_path(locale: &str) -> String {
    format!("/{locale}/auth/forgot")
}

pub fn resend_verification_path(locale: &str) -> String {
    format!("/{locale}/auth/resend")
}
