//! Pure field validators shared by the login and registration flows. Each
//! validator maps raw input to an optional [`FieldError`]; none of them look at
//! previous error state, so running one twice on the same input is a no-op.

use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length, also the first strength criterion.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Why a field is currently invalid. Display text is chosen per flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldError {
    InvalidEmail,
    PasswordTooShort,
    PasswordTooWeak,
    PasswordMismatch,
    Required,
}

/// How many character classes besides length a password must satisfy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// Length plus at least one of uppercase, digit or symbol.
    #[default]
    AnyClass,
    /// Length plus all of uppercase, digit and symbol.
    AllClasses,
}

/// The four independent strength criteria for one password.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordCriteria {
    pub long_enough: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordCriteria {
    pub fn of(password: &str) -> Self {
        Self {
            long_enough: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_uppercase: password.chars().any(char::is_uppercase),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(is_symbol),
        }
    }

    /// One point per satisfied criterion, 0 to 4.
    pub fn score(self) -> u8 {
        [
            self.long_enough,
            self.has_uppercase,
            self.has_digit,
            self.has_symbol,
        ]
        .into_iter()
        .map(u8::from)
        .sum()
    }

    fn class_count(self) -> usize {
        [self.has_uppercase, self.has_digit, self.has_symbol]
            .into_iter()
            .filter(|met| *met)
            .count()
    }
}

/// Result of [`validate_password`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordCheck {
    pub error: Option<FieldError>,
    pub score: u8,
}

fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

/// Empty input is not an error; otherwise the value must look like
/// `local@domain.tld` with no whitespace.
pub fn validate_email(value: &str) -> Option<FieldError> {
    if value.is_empty() || is_valid_email(value) {
        None
    } else {
        Some(FieldError::InvalidEmail)
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Scores the password and reports whether it meets `policy`. An empty
/// password scores 0 and carries no error.
pub fn validate_password(value: &str, policy: PasswordPolicy) -> PasswordCheck {
    if value.is_empty() {
        return PasswordCheck::default();
    }

    let criteria = PasswordCriteria::of(value);
    let classes_met = match policy {
        PasswordPolicy::AnyClass => criteria.class_count() >= 1,
        PasswordPolicy::AllClasses => criteria.class_count() == 3,
    };
    let error = if !criteria.long_enough {
        Some(FieldError::PasswordTooShort)
    } else if !classes_met {
        Some(FieldError::PasswordTooWeak)
    } else {
        None
    };

    PasswordCheck {
        error,
        score: criteria.score(),
    }
}

/// Mismatch is only reported once something has been typed into `confirm`.
pub fn validate_confirmation(password: &str, confirm: &str) -> Option<FieldError> {
    if !confirm.is_empty() && password != confirm {
        Some(FieldError::PasswordMismatch)
    } else {
        None
    }
}

/// `shown` is true once the field was blurred or the form submitted.
pub fn validate_required(value: &str, shown: bool) -> Option<FieldError> {
    (shown && value.is_empty()).then_some(FieldError::Required)
}
