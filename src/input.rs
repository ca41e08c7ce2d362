//! Structured path input.
//!
//! Input is a JSON array of paths, each an array of `{"x": number,
//! "y": number}` objects. Malformed paths are rejected one by one; the rest
//! of the batch still loads.

use serde_json::Value;
use thiserror::Error;

use crate::geom::Point;

/// Errors that reject a whole input batch.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("path input is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("path input must be a list of paths, found {found}")]
    NotAList { found: &'static str },
}

/// A single path that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path {}: {reason}", .index + 1)]
pub struct RejectedPath {
    /// Zero-based position in the input list.
    pub index: usize,
    /// Why the entry was rejected.
    pub reason: String,
}

/// Result of parsing a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPaths {
    /// Valid paths in input order.
    pub paths: Vec<Vec<Point>>,
    /// Entries that were skipped.
    pub rejected: Vec<RejectedPath>,
}

/// Parse a batch of paths from JSON text.
///
/// Blank input is an empty batch.
pub fn parse_paths(text: &str) -> Result<ParsedPaths, InputError> {
    if text.trim().is_empty() {
        return Ok(ParsedPaths::default());
    }
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(InputError::NotAList {
            found: kind(&value),
        });
    };

    let mut parsed = ParsedPaths::default();
    for (index, item) in items.into_iter().enumerate() {
        match parse_path(item) {
            Ok(points) => parsed.paths.push(points),
            Err(reason) => {
                let rejected = RejectedPath { index, reason };
                tracing::warn!(%rejected, "rejected path");
                parsed.rejected.push(rejected);
            }
        }
    }
    Ok(parsed)
}

fn parse_path(item: Value) -> Result<Vec<Point>, String> {
    if !item.is_array() {
        return Err(format!("expected a list of points, found {}", kind(&item)));
    }
    serde_json::from_value(item).map_err(|err| err.to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
