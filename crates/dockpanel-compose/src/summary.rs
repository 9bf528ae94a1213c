//! Display-oriented projection of a compose tree.
//!
//! A summary is always recomputed from scratch and never patched. Entry
//! order follows the key order of the source document.

use dockpanel_common::constants::{
    BUILD_CONTEXT_IMAGE, DEFAULT_NETWORK_DRIVER, DEFAULT_VOLUME_DRIVER,
};
use dockpanel_common::types::CollectionKind;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::parser::ast::{ComposeTree, ServiceView};

/// A service as shown in the project dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Service name.
    pub name: String,
    /// Image reference, or `"build context"` for locally built services.
    pub image: String,
    /// Environment files referenced by the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_files: Vec<String>,
}

/// A named volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeEntry {
    /// Volume name.
    pub name: String,
    /// Volume driver, `"local"` unless declared.
    pub driver: String,
}

/// A named network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    /// Network key in the document.
    pub name: String,
    /// Network driver, `"bridge"` unless declared.
    pub driver: String,
    /// Explicit `name` override, when one is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

/// Derived view of a compose document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeSummary {
    /// Services in source order.
    pub services: Vec<ServiceEntry>,
    /// Volumes in source order.
    pub volumes: Vec<VolumeEntry>,
    /// Networks in source order.
    pub networks: Vec<NetworkEntry>,
}

impl ComposeSummary {
    /// Returns the number of entries in a collection.
    #[must_use]
    pub fn count(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Services => self.services.len(),
            CollectionKind::Volumes => self.volumes.len(),
            CollectionKind::Networks => self.networks.len(),
        }
    }

    /// Returns whether a collection lists an entry with this name.
    #[must_use]
    pub fn contains(&self, kind: CollectionKind, name: &str) -> bool {
        match kind {
            CollectionKind::Services => self.services.iter().any(|s| s.name == name),
            CollectionKind::Volumes => self.volumes.iter().any(|v| v.name == name),
            CollectionKind::Networks => self.networks.iter().any(|n| n.name == name),
        }
    }
}

/// Extracts the summary of a tree.
///
/// Sections that are absent or not maps contribute no entries.
#[must_use]
pub fn extract(tree: &ComposeTree) -> ComposeSummary {
    let services = tree
        .entries(CollectionKind::Services)
        .map(|(name, definition)| {
            let view = ServiceView::new(definition);
            ServiceEntry {
                name: name.to_owned(),
                image: view
                    .image()
                    .filter(|image| !image.is_empty())
                    .unwrap_or(BUILD_CONTEXT_IMAGE)
                    .to_owned(),
                env_files: view.env_files(),
            }
        })
        .collect();

    let volumes = tree
        .entries(CollectionKind::Volumes)
        .map(|(name, definition)| VolumeEntry {
            name: name.to_owned(),
            driver: driver_or(definition, DEFAULT_VOLUME_DRIVER),
        })
        .collect();

    let networks = tree
        .entries(CollectionKind::Networks)
        .map(|(name, definition)| NetworkEntry {
            name: name.to_owned(),
            driver: driver_or(definition, DEFAULT_NETWORK_DRIVER),
            custom_name: definition
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
        .collect();

    ComposeSummary {
        services,
        volumes,
        networks,
    }
}

fn driver_or(definition: &Value, default: &str) -> String {
    definition
        .get("driver")
        .and_then(Value::as_str)
        .filter(|driver| !driver.is_empty())
        .unwrap_or(default)
        .to_owned()
}
