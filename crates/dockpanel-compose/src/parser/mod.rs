//! Compose document parsing built on `serde_yaml`.
//!
//! Converts raw text into an insertion-ordered [`ComposeTree`] and back.
//! Structural checks live in [`validator`].

pub mod ast;
pub mod validator;

use crate::error::{ComposeError, Position, Result};

use self::ast::ComposeTree;

/// Parses raw compose text into a tree.
///
/// Empty text is rejected before any deserialization is attempted.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyDocument`] for zero-length input and
/// [`ComposeError::MalformedDocument`] when the text is not valid YAML.
pub fn parse(input: &str) -> Result<ComposeTree> {
    if input.is_empty() {
        return Err(ComposeError::EmptyDocument);
    }
    tracing::debug!(bytes = input.len(), "parsing compose document");
    serde_yaml::from_str(input)
        .map(ComposeTree::new)
        .map_err(|e| ComposeError::MalformedDocument {
            position: e.location().map(|l| Position {
                line: l.line(),
                column: l.column(),
            }),
            message: e.to_string(),
        })
}

/// Serializes a tree back to YAML text.
///
/// Key order follows the tree, so parsing the output reproduces an
/// identical tree.
///
/// # Errors
///
/// Returns an error if the tree holds a value YAML cannot represent.
pub fn serialize(tree: &ComposeTree) -> Result<String> {
    serde_yaml::to_string(tree.root()).map_err(|e| ComposeError::MalformedDocument {
        message: format!("cannot serialize document: {e}"),
        position: None,
    })
}
