//! Structured error types shared across lbx crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LbxError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (process names, parameter keys, etc.).
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

/// Canonical error type for the lbx crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LbxError {
    /// Process registry errors (unknown or duplicate process identifiers).
    #[error("process error: {0}")]
    Process(ErrorInfo),
    /// A required entry is absent from the parameter table.
    #[error("parameter error: {0}")]
    Parameter(ErrorInfo),
    /// Opt-in kinematic range checks and grid construction errors.
    #[error("kinematics error: {0}")]
    Kinematics(ErrorInfo),
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

impl LbxError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LbxError::Process(info)
            | LbxError::Parameter(info)
            | LbxError::Kinematics(info)
            | LbxError::Serde(info) => info,
        }
    }

    /// Attaches a context entry to the payload of any family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            LbxError::Process(info) => LbxError::Process(info.with_context(key, value)),
            LbxError::Parameter(info) => LbxError::Parameter(info.with_context(key, value)),
            LbxError::Kinematics(info) => LbxError::Kinematics(info.with_context(key, value)),
            LbxError::Serde(info) => LbxError::Serde(info.with_context(key, value)),
        }
    }

    /// Builds the error raised when a process identifier is not registered.
    pub fn unknown_process(process: &str) -> Self {
        LbxError::Process(
            ErrorInfo::new("lbx.unknown_process", format!("unknown process '{process}'"))
                .with_context("process", process),
        )
    }

    /// Builds the error raised when a parameter key is absent.
    pub fn missing_parameter(key: &str) -> Self {
        LbxError::Parameter(
            ErrorInfo::new("lbx.missing_parameter", format!("missing parameter '{key}'"))
                .with_context("key", key),
        )
    }

    /// Returns `true` for the unknown-process error.
    pub fn is_unknown_process(&self) -> bool {
        matches!(self, LbxError::Process(info) if info.code == "lbx.unknown_process")
    }

    /// Returns the missing key when this is a missing-parameter error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            LbxError::Parameter(info) if info.code == "lbx.missing_parameter" => {
                info.context.get("key").map(String::as_str)
            }
            _ => None,
        }
    }
}
