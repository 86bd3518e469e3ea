//! Structured error types shared across socnet crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`NetError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
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

/// Canonical error type for the socnet engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NetError {
    /// Node/edge structural errors raised by the graph model.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Adjacency matrix shape, index and domain errors.
    #[error("matrix error: {0}")]
    Matrix(ErrorInfo),
    /// Graph to matrix conversion errors.
    #[error("convert error: {0}")]
    Convert(ErrorInfo),
    /// Degree-sequence generator parameter errors.
    #[error("generator error: {0}")]
    Generator(ErrorInfo),
    /// Precondition violations detected by analysis and rewiring.
    #[error("analysis error: {0}")]
    Analysis(ErrorInfo),
    /// Randomness and distribution errors.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
    /// Configuration parsing errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
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

impl NetError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NetError::Graph(info)
            | NetError::Matrix(info)
            | NetError::Convert(info)
            | NetError::Generator(info)
            | NetError::Analysis(info)
            | NetError::Rng(info)
            | NetError::Config(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Sets the remediation hint regardless of the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            NetError::Graph(info) => NetError::Graph(info.with_hint(hint)),
            NetError::Matrix(info) => NetError::Matrix(info.with_hint(hint)),
            NetError::Convert(info) => NetError::Convert(info.with_hint(hint)),
            NetError::Generator(info) => NetError::Generator(info.with_hint(hint)),
            NetError::Analysis(info) => NetError::Analysis(info.with_hint(hint)),
            NetError::Rng(info) => NetError::Rng(info.with_hint(hint)),
            NetError::Config(info) => NetError::Config(info.with_hint(hint)),
        }
    }

    /// Adds a context entry to the payload regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        let value = value.to_string();
        match self {
            NetError::Graph(info) => NetError::Graph(info.with_context(key, value)),
            NetError::Matrix(info) => NetError::Matrix(info.with_context(key, value)),
            NetError::Convert(info) => NetError::Convert(info.with_context(key, value)),
            NetError::Generator(info) => NetError::Generator(info.with_context(key, value)),
            NetError::Analysis(info) => NetError::Analysis(info.with_context(key, value)),
            NetError::Rng(info) => NetError::Rng(info.with_context(key, value)),
            NetError::Config(info) => NetError::Config(info.with_context(key, value)),
        }
    }
}
