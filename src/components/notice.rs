//! Transient notices (toasts) and inline alert banners. Messages are already
//! translated text and must never include secrets or tokens.

use std::{fmt, time::Duration};

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(3_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
    Info,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertKind::Error => "error",
            AlertKind::Success => "success",
            AlertKind::Info => "info",
        };
        formatter.write_str(label)
    }
}

/// A single toast shown after a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub duration: Duration,
    pub closable: bool,
}

impl Notice {
    pub fn new(kind: AlertKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            duration: NOTICE_DURATION,
            closable: true,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[{}] {}: {}", self.kind, self.title, self.description)
    }
}

/// Persistent banner rendered above a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}
