//! Core error types for graph building and encoding
//!
//! Every fallible operation in the crate returns [`DiagramError`]. Failures are
//! raised before any state is mutated, so a rejected call leaves the graph as
//! it was.

use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T, E = DiagramError> = std::result::Result<T, E>;

/// Core error types for graph building and encoding
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Invalid {kind}: '{value}' (expected one of: {allowed})")]
    InvalidValue {
        kind: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Invalid depth: {value} (expected a non-negative integer)")]
    InvalidDepth { value: String },

    #[error("Invalid tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl DiagramError {
    /// Create an error for a value outside a closed set of names
    pub fn invalid_value(kind: &'static str, value: impl Into<String>, allowed: &[&str]) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
            allowed: allowed.join(", "),
        }
    }

    /// Create an error for a depth that is not a non-negative integer
    pub fn invalid_depth(value: impl ToString) -> Self {
        Self::InvalidDepth {
            value: value.to_string(),
        }
    }

    /// Create an error for a malformed state-machine tag
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value() {
        let error = DiagramError::invalid_value("shape", "blob", &["rect", "round"]);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid shape"));
        assert!(error_msg.contains("'blob'"));
        assert!(error_msg.contains("rect, round"));
    }

    #[test]
    fn test_invalid_depth() {
        let error = DiagramError::invalid_depth(1.5);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid depth"));
        assert!(error_msg.contains("1.5"));
    }

    #[test]
    fn test_invalid_tag() {
        let error = DiagramError::invalid_tag("var:oops", "missing '='");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("var:oops"));
        assert!(error_msg.contains("missing '='"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: DiagramError = json_err.into();
        assert!(format!("{}", error).contains("JSON error"));
    }
}
