//! Genre options offered by the selection widget. The list is supplied by the
//! caller; this module only defines its shape and loads it from JSON.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreOption {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCategory {
    pub category: String,
    pub options: Vec<GenreOption>,
}

/// Parses `[{ "category": ..., "options": [{ "value": ..., "label": ... }] }]`.
///
/// # Errors
/// Returns `AppError::Parse` for malformed documents.
pub fn parse_categories(document: &str) -> Result<Vec<GenreCategory>, AppError> {
    serde_json::from_str(document)
        .map_err(|err| AppError::Parse(format!("Invalid genre catalog: {err}")))
}

/// Reads a genre catalog file.
///
/// # Errors
/// Returns `AppError::Config` if the file cannot be read and `AppError::Parse`
/// if it is malformed.
pub fn load_categories(path: &Path) -> Result<Vec<GenreCategory>, AppError> {
    let document = fs::read_to_string(path)
        .map_err(|err| AppError::Config(format!("Failed to read {}: {err}", path.display())))?;
    parse_categories(&document)
}
