//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Default base directory for Dockpanel data when no home directory exists.
pub const SYSTEM_DATA_DIR: &str = "/var/lib/dockpanel";

/// Returns the data directory, preferring `$HOME/.dockpanel` and
/// falling back to `/var/lib/dockpanel`.
fn resolve_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(".dockpanel");
    }
    PathBuf::from(SYSTEM_DATA_DIR)
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Environment file injected into every service by strict mode.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Image label shown for services that are built from a local context.
pub const BUILD_CONTEXT_IMAGE: &str = "build context";

/// Driver reported for volumes that do not declare one.
pub const DEFAULT_VOLUME_DRIVER: &str = "local";

/// Driver reported for networks that do not declare one.
pub const DEFAULT_NETWORK_DRIVER: &str = "bridge";

/// Reason surfaced when a removal would leave a document without services.
pub const LAST_SERVICE_REASON: &str = "at least one service required";

/// File extension of persisted document snapshots.
pub const SNAPSHOT_EXTENSION: &str = "json";
