//! Structured error types shared across the venn crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`VennError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (column names, cardinalities, rows).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller fix the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for table resolution, counting and rendering.
///
/// None of these are transient: they describe structural problems with the
/// input table or configuration, so callers should report and exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum VennError {
    /// The table has a header but no data rows.
    #[error("empty table: {0}")]
    EmptyTable(ErrorInfo),
    /// Fewer than 2 or more than 3 indicator columns were requested or found.
    #[error("unsupported cardinality: {0}")]
    UnsupportedCardinality(ErrorInfo),
    /// More than 3 indicator columns qualify and no selection was given.
    #[error("ambiguous columns: {0}")]
    AmbiguousColumns(ErrorInfo),
    /// A set collection handed to the counter does not hold 2 or 3 sets.
    #[error("invalid cardinality: {0}")]
    InvalidCardinality(ErrorInfo),
    /// A cell in an indicator column is not a boolean literal.
    #[error("malformed indicator: {0}")]
    MalformedIndicator(ErrorInfo),
    /// Reading or parsing the delimited input failed.
    #[error("table error: {0}")]
    Table(ErrorInfo),
    /// Styling configuration is out of range.
    #[error("style error: {0}")]
    Style(ErrorInfo),
    /// Figure output failed.
    #[error("render error: {0}")]
    Render(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl VennError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            VennError::EmptyTable(info)
            | VennError::UnsupportedCardinality(info)
            | VennError::AmbiguousColumns(info)
            | VennError::InvalidCardinality(info)
            | VennError::MalformedIndicator(info)
            | VennError::Table(info)
            | VennError::Style(info)
            | VennError::Render(info)
            | VennError::Serde(info) => info,
        }
    }
}
