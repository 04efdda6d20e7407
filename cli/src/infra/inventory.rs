//! Ephemeral inventory artifact ownership.

use std::any::Any;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::application::ports::InventoryStore;
use crate::domain::{inventory, Target};

/// Production [`InventoryStore`] writing to a uniquely named file in the
/// system temp directory. The returned guard is the [`NamedTempFile`]
/// itself — dropping it removes the artifact.
pub struct TempInventoryStore;

impl InventoryStore for TempInventoryStore {
    fn write(&self, target: &Target, ssh_user: &str) -> Result<(PathBuf, Box<dyn Any>)> {
        let mut file = tempfile::Builder::new()
            .prefix("garrison-inventory-")
            .suffix(".ini")
            .tempfile()
            .context("creating inventory file")?;
        file.write_all(inventory::render(target, ssh_user).as_bytes())
            .context("writing inventory file")?;
        let path = file.path().to_path_buf();
        Ok((path, Box::new(file)))
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
