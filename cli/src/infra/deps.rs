//! Preflight checks for local prerequisites.
//!
//! Runs after validation and before any network or privileged action, so a
//! machine without Ansible fails in milliseconds instead of mid-deploy.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::Preflight;
use crate::domain::error::DependencyError;

/// Executables the orchestration engine needs, checked in order.
pub const REQUIRED_EXECUTABLES: [&str; 2] = ["ansible-playbook", "ansible-galaxy"];

/// Wordlist the playbook consumes to generate human-readable passphrases.
/// Expected next to the playbook in the working directory.
pub const WORDLIST_FILE: &str = "eff_large_wordlist.txt";

/// Production [`Preflight`] checking the real `PATH` and working directory.
pub struct HostPreflight;

impl Preflight for HostPreflight {
    fn check(&self) -> Result<()> {
        let path = std::env::var_os("PATH").unwrap_or_default();
        check_executables(&path)?;
        check_wordlist(Path::new(WORDLIST_FILE))?;
        Ok(())
    }
}

/// Verify every required executable is present on the given search path.
///
/// # Errors
///
/// Returns [`DependencyError::MissingExecutable`] naming the first missing
/// one.
pub fn check_executables(path: &OsStr) -> Result<()> {
    for name in REQUIRED_EXECUTABLES {
        if find_in_path(name, path).is_none() {
            return Err(DependencyError::MissingExecutable {
                name: name.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Verify the wordlist resource exists.
///
/// # Errors
///
/// Returns [`DependencyError::MissingWordlist`] with a download hint.
pub fn check_wordlist(wordlist: &Path) -> Result<()> {
    if !wordlist.is_file() {
        return Err(DependencyError::MissingWordlist {
            path: wordlist.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Locate `name` in the given search path.
fn find_in_path(name: &str, path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && path
            .metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
