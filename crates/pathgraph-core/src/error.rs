//! Error types and exit codes for pathgraph
//!
//! Exit codes:
//! - 0: Success (including "no path found")
//! - 1: Generic failure
//! - 2: Usage or configuration error
//! - 3: Data error (unreadable graph document, unknown node, missing property)
//!
//! A path that does not exist is never an error: finders encode it as
//! `Ok(None)` or an empty iterator.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

use crate::graph::types::{NodeId, RelationshipId};

/// Exit codes for the pathgraph binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage or configuration error (2)
    Usage = 2,
    /// Data error - bad graph document, unknown node (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building graphs or finding paths
#[derive(Error, Debug)]
pub enum PathError {
    // Usage / configuration errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    /// A finder was configured without something its search mode needs
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("relationship not found: {id}")]
    RelationshipNotFound { id: RelationshipId },

    #[error("no node matches {selector}")]
    UnknownEndpoint { selector: String },

    #[error("property '{key}' not found on relationship {relationship}")]
    MissingProperty {
        key: String,
        relationship: RelationshipId,
    },

    #[error("invalid graph document {path:?}: {reason}")]
    InvalidGraph { path: PathBuf, reason: String },

    // Hard traversal failures (exit code 1)
    /// An evaluator broke its contract (negative or non-finite value)
    #[error("contract violation: {reason}")]
    ContractViolation { reason: String },

    #[error("search aborted: {limit} exceeded after {steps} steps")]
    LimitExceeded { limit: String, steps: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl PathError {
    /// Create an error for an invalid finder configuration
    pub fn invalid_configuration(reason: impl std::fmt::Display) -> Self {
        PathError::InvalidConfiguration {
            reason: reason.to_string(),
        }
    }

    /// Create an error for an evaluator that returned an illegal value
    pub fn contract_violation(reason: impl std::fmt::Display) -> Self {
        PathError::ContractViolation {
            reason: reason.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        PathError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a malformed graph document
    pub fn invalid_graph(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        PathError::InvalidGraph {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PathError::UnknownFormat(_)
            | PathError::UsageError(_)
            | PathError::InvalidConfiguration { .. }
            | PathError::InvalidValue { .. } => ExitCode::Usage,

            PathError::NodeNotFound { .. }
            | PathError::RelationshipNotFound { .. }
            | PathError::UnknownEndpoint { .. }
            | PathError::MissingProperty { .. }
            | PathError::InvalidGraph { .. }
            | PathError::Json(_)
            | PathError::Toml(_) => ExitCode::Data,

            PathError::ContractViolation { .. }
            | PathError::LimitExceeded { .. }
            | PathError::Io(_)
            | PathError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            PathError::UnknownFormat(_) => "unknown_format",
            PathError::UsageError(_) => "usage_error",
            PathError::InvalidConfiguration { .. } => "invalid_configuration",
            PathError::InvalidValue { .. } => "invalid_value",
            PathError::NodeNotFound { .. } => "node_not_found",
            PathError::RelationshipNotFound { .. } => "relationship_not_found",
            PathError::UnknownEndpoint { .. } => "unknown_endpoint",
            PathError::MissingProperty { .. } => "missing_property",
            PathError::InvalidGraph { .. } => "invalid_graph",
            PathError::ContractViolation { .. } => "contract_violation",
            PathError::LimitExceeded { .. } => "limit_exceeded",
            PathError::Io(_) => "io_error",
            PathError::Json(_) => "json_error",
            PathError::Toml(_) => "toml_error",
            PathError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for pathgraph operations
pub type Result<T> = std::result::Result<T, PathError>;
