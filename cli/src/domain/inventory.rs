//! Inventory rendering — one group, exactly one host.
//!
//! Topology only: all dynamic configuration travels through the engine's
//! variable channel, never through the inventory.

use crate::domain::target::Target;

/// Group header for the single managed host.
pub const INVENTORY_GROUP: &str = "garrison";

/// Render the inventory text for the resolved target.
#[must_use]
pub fn render(target: &Target, ssh_user: &str) -> String {
    match target {
        Target::Local => {
            format!("[{INVENTORY_GROUP}]\nlocalhost ansible_connection=local\n")
        }
        Target::Remote { addr } => {
            format!("[{INVENTORY_GROUP}]\n{addr} ansible_user={ssh_user}\n")
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
