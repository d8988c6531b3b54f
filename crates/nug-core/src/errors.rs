//! Structured error types shared across the grading crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`NugError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (isotopes, channels, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
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

/// Canonical error type for the grading engine.
///
/// Missing measurement tables and missing evaluations are not errors; they are
/// recorded on the affected reaction and grading continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NugError {
    /// Invalid grading options. Aborts the whole grading pass.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// A calculator received input that violates its contract.
    #[error("precondition violated: {0}")]
    Precondition(ErrorInfo),
    /// A data source failed to read or parse its backing store.
    #[error("data error: {0}")]
    Data(ErrorInfo),
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

impl NugError {
    /// Shorthand for a [`NugError::Configuration`] error.
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        NugError::Configuration(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`NugError::Precondition`] error.
    pub fn precondition(code: &str, message: impl Into<String>) -> Self {
        NugError::Precondition(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`NugError::Data`] error.
    pub fn data(code: &str, message: impl Into<String>) -> Self {
        NugError::Data(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NugError::Configuration(info)
            | NugError::Precondition(info)
            | NugError::Data(info)
            | NugError::Serde(info) => info,
        }
    }

    /// Whether the error must abort the grading pass instead of degrading a
    /// single channel.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NugError::Configuration(_) | NugError::Precondition(_))
    }
}
