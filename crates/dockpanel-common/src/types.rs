//! Domain primitive types used across the Dockpanel workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DockpanelError;

/// Unique identifier for a project draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new project ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random project ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three named collections of a compose document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// The `services` map.
    Services,
    /// The top-level `volumes` map.
    Volumes,
    /// The top-level `networks` map.
    Networks,
}

impl CollectionKind {
    /// All collections, in document order.
    pub const ALL: [Self; 3] = [Self::Services, Self::Volumes, Self::Networks];

    /// Returns the top-level document key of this collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Volumes => "volumes",
            Self::Networks => "networks",
        }
    }

    /// Returns the singular noun used in user-facing messages.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Services => "service",
            Self::Volumes => "volume",
            Self::Networks => "network",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CollectionKind {
    type Err = DockpanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "services" | "service" => Ok(Self::Services),
            "volumes" | "volume" => Ok(Self::Volumes),
            "networks" | "network" => Ok(Self::Networks),
            other => Err(DockpanelError::Config {
                message: format!(
                    "unknown collection \"{other}\" (expected services, volumes, or networks)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_kind_parses_singular_and_plural() {
        assert_eq!(
            "services".parse::<CollectionKind>().expect("parse"),
            CollectionKind::Services
        );
        assert_eq!(
            "Network".parse::<CollectionKind>().expect("parse"),
            CollectionKind::Networks
        );
    }

    #[test]
    fn collection_kind_rejects_unknown() {
        let err = "secrets".parse::<CollectionKind>().unwrap_err();
        assert!(err.to_string().contains("secrets"), "got: {err}");
    }

    #[test]
    fn collection_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CollectionKind::Volumes).expect("serialize");
        assert_eq!(json, "\"volumes\"");
    }

    #[test]
    fn generated_project_ids_differ() {
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }
}
