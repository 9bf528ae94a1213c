//! Error taxonomy of the compose engine.

use std::fmt;

use dockpanel_common::error::DockpanelError;
use thiserror::Error;

/// A single structural problem found by the schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dotted path to the offending field, e.g. `services.web.ports.0`.
    pub path: String,
    /// What is wrong with the field.
    pub message: String,
}

impl SchemaViolation {
    /// Creates a violation for the given field path.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field \"{}\": {}", self.path, self.message)
    }
}

/// Line and column of a parse failure, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number.
    pub line: usize,
    /// Column number.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Errors produced by the compose engine.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The raw text was empty; nothing was parsed.
    #[error("invalid docker configuration: empty document")]
    EmptyDocument,

    /// The raw text is not valid YAML.
    #[error("malformed document: {message}")]
    MalformedDocument {
        /// Parser message.
        message: String,
        /// Location of the failure, when the parser reports one.
        position: Option<Position>,
    },

    /// The document parsed but breaks the structural contract.
    #[error("invalid docker configuration: {}", join_violations(.violations))]
    Schema {
        /// Every violation found, in traversal order. Never empty.
        violations: Vec<SchemaViolation>,
    },

    /// The action is well formed but forbidden by a domain invariant.
    #[error("{reason}")]
    Rejected {
        /// Why the action was refused.
        reason: String,
    },

    /// `depends_on` declarations form a cycle.
    #[error("cyclic dependency detected involving service \"{service}\"")]
    DependencyCycle {
        /// A service that participates in the cycle.
        service: String,
    },

    /// Persistence or configuration failure.
    #[error(transparent)]
    Common(#[from] DockpanelError),
}

impl ComposeError {
    /// Creates a guarded rejection.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns every human-readable reason carried by this error.
    ///
    /// Schema failures yield one entry per violation; every other variant
    /// yields exactly one entry.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Schema { violations } => violations.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, ComposeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_violation() {
        let err = ComposeError::Schema {
            violations: vec![
                SchemaViolation::new("services.web.image", "expected a string"),
                SchemaViolation::new("volumes", "expected a map"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("services.web.image"), "got: {msg}");
        assert!(msg.contains("volumes"), "got: {msg}");
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn rejection_message_is_the_reason() {
        let err = ComposeError::rejected("at least one service required");
        assert_eq!(err.messages(), vec!["at least one service required"]);
    }
}
