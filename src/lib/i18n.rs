//! Message lookup seam. Everything user-facing is produced as a key and resolved
//! through [`Translate`]; the crate never formats display text itself. The
//! bundled [`Catalog`] is a flat key/value table with `{name}` placeholders and
//! falls back to the key when a message is missing.

use super::errors::AppError;
use std::{collections::HashMap, fs, path::Path};

const EMBEDDED_MESSAGES: &str = include_str!("../../messages/en.json");

/// Resolves message keys to display text.
pub trait Translate {
    /// Resolves `key`, substituting `{name}` placeholders from `params`.
    fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String;

    fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }
}

impl<T: Translate + ?Sized> Translate for &T {
    fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        (**self).t_with(key, params)
    }
}

/// Returns keys untouched. Useful for hosts that localize downstream and for
/// asserting on keys in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyEcho;

impl Translate for KeyEcho {
    fn t_with(&self, key: &str, _params: &[(&str, &str)]) -> String {
        key.to_string()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// English messages compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_MESSAGES).unwrap_or_default()
    }

    /// Parses a flat JSON object of `key: message` pairs.
    ///
    /// # Errors
    /// Returns `AppError::Parse` if the document is not a flat string map.
    pub fn from_json(document: &str) -> Result<Self, AppError> {
        let messages: HashMap<String, String> = serde_json::from_str(document)
            .map_err(|err| AppError::Parse(format!("Invalid message catalog: {err}")))?;
        Ok(Self { messages })
    }

    /// Reads a catalog file.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the file cannot be read and
    /// `AppError::Parse` if it is malformed.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let document = fs::read_to_string(path).map_err(|err| {
            AppError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_json(&document)
    }

    /// Layers `overrides` on top of this catalog.
    #[must_use]
    pub fn merged(mut self, overrides: Catalog) -> Self {
        self.messages.extend(overrides.messages);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }
}

impl Translate for Catalog {
    fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.messages.get(key) else {
            return key.to_string();
        };
        params
            .iter()
            .fold(template.clone(), |message, (name, value)| {
                message.replace(&format!("{{{name}}}"), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, KeyEcho, Translate};

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = Catalog::embedded();
        assert!(catalog.contains("loginFailedDesc"));
        assert!(catalog.contains("passwordStrengthLevel4"));
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let catalog = Catalog::default();
        assert_eq!(catalog.t("unknownKey"), "unknownKey");
    }

    #[test]
    fn placeholders_are_substituted() {
        let catalog = Catalog::from_json(r#"{"selected":"{value} selected"}"#).unwrap_or_default();
        assert_eq!(
            catalog.t_with("selected", &[("value", "Jazz")]),
            "Jazz selected"
        );
    }

    #[test]
    fn merged_overrides_existing_messages() {
        let base = Catalog::from_json(r#"{"a":"one","b":"two"}"#).unwrap_or_default();
        let overrides = Catalog::from_json(r#"{"b":"deux"}"#).unwrap_or_default();
        let catalog = base.merged(overrides);
        assert_eq!(catalog.t("a"), "one");
        assert_eq!(catalog.t("b"), "deux");
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        assert!(Catalog::from_json(r#"{"a":{"nested":true}}"#).is_err());
    }

    #[test]
    fn key_echo_returns_key() {
        assert_eq!(KeyEcho.t_with("nameRequired", &[("x", "y")]), "nameRequired");
    }
}
