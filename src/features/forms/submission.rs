//! Result of one submit attempt and the notice it produces.

use super::machine::Rejection;
use crate::{
    app_lib::Translate,
    components::{AlertKind, Notice},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// Pre-flight: a field shows a validation error. No call was made.
    InvalidFields,
    /// Pre-flight: a required field is empty. No call was made.
    MissingRequired,
    /// A submission was already running; this attempt was ignored.
    InFlight,
    /// The identity provider refused the credentials.
    CredentialsRejected,
    /// The identity provider reported an unverified email address.
    EmailNotVerified,
    /// The server answered with a non-2xx status.
    ServerRejected,
    /// The request never produced a usable response.
    Transport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The host was sent to a third-party page to finish; no notice.
    Redirected,
    Failure(FailureReason),
}

/// Produced once per submit attempt; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
    pub outcome: Outcome,
    pub title: String,
    pub message: String,
}

/// Message keys a flow uses for pre-flight rejections.
#[derive(Clone, Copy, Debug)]
pub struct PreflightKeys {
    pub title: &'static str,
    pub invalid_fields: &'static str,
    pub missing_required: &'static str,
}

impl SubmissionResult {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn redirected() -> Self {
        Self {
            outcome: Outcome::Redirected,
            title: String::new(),
            message: String::new(),
        }
    }

    pub fn failure(
        reason: FailureReason,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            outcome: Outcome::Failure(reason),
            title: title.into(),
            message: message.into(),
        }
    }

    /// Maps a pre-flight rejection onto the flow's message keys.
    pub fn rejected(rejection: Rejection, keys: PreflightKeys, t: &impl Translate) -> Self {
        match rejection {
            Rejection::InFlight => Self::failure(FailureReason::InFlight, "", ""),
            Rejection::InvalidFields => Self::failure(
                FailureReason::InvalidFields,
                t.t(keys.title),
                t.t(keys.invalid_fields),
            ),
            Rejection::MissingRequired => Self::failure(
                FailureReason::MissingRequired,
                t.t(keys.title),
                t.t(keys.missing_required),
            ),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success | Outcome::Redirected)
    }

    pub fn reason(&self) -> Option<FailureReason> {
        match self.outcome {
            Outcome::Success | Outcome::Redirected => None,
            Outcome::Failure(reason) => Some(reason),
        }
    }

    /// The toast to show, if any. Redirects and ignored in-flight attempts
    /// show nothing.
    pub fn notice(&self) -> Option<Notice> {
        match self.outcome {
            Outcome::Success => Some(Notice::new(
                AlertKind::Success,
                self.title.clone(),
                self.message.clone(),
            )),
            Outcome::Redirected | Outcome::Failure(FailureReason::InFlight) => None,
            Outcome::Failure(_) => Some(Notice::new(
                AlertKind::Error,
                self.title.clone(),
                self.message.clone(),
            )),
        }
    }
}
