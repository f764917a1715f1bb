//! Password strength scoring and the derived meter shown under the password
//! field. Both are pure functions of the current password.

use super::validation::PasswordCriteria;

/// Label keys indexed by score.
pub const STRENGTH_LEVEL_KEYS: [&str; 5] = [
    "passwordStrengthLevel0",
    "passwordStrengthLevel1",
    "passwordStrengthLevel2",
    "passwordStrengthLevel3",
    "passwordStrengthLevel4",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub label_key: &'static str,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        let score = PasswordCriteria::of(password).score();
        Self {
            score,
            label_key: STRENGTH_LEVEL_KEYS[usize::from(score.min(4))],
        }
    }
}

/// Color band of the meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthTone {
    Red,
    Yellow,
    Green,
}

/// Progress bar state; hidden while the password is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrengthMeter {
    pub percent: u8,
    pub tone: StrengthTone,
    pub label_key: &'static str,
}

impl StrengthMeter {
    pub fn for_password(password: &str) -> Option<Self> {
        if password.is_empty() {
            return None;
        }
        Some(Self::from(PasswordStrength::of(password)))
    }
}

impl From<PasswordStrength> for StrengthMeter {
    fn from(strength: PasswordStrength) -> Self {
        let tone = match strength.score {
            0 | 1 => StrengthTone::Red,
            2 => StrengthTone::Yellow,
            _ => StrengthTone::Green,
        };
        Self {
            percent: strength.score * 25,
            tone,
            label_key: strength.label_key,
        }
    }
}
