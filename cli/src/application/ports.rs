//! Port trait definitions for the application layer.
//!
//! Ports are the contracts infrastructure must fulfill. This file imports
//! only from `crate::domain` — never from `crate::infra` or `crate::output`.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::{ResolvedConfig, Target};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. On timeout, the child must be killed (not left
    /// orphaned).
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with inherited stdio and return only its exit status.
    /// No timeout — used for interactive child processes whose prompts and
    /// output must reach the operator's terminal directly.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Prompter Port ─────────────────────────────────────────────────────────────

/// Abstracts operator prompts so resolution stages can be tested with
/// scripted answers.
///
/// Every method returns `None` when the operator gives no usable answer
/// (blank input with no default, or a closed input stream); the caller
/// leaves the field unset and later stages decide the outcome.
pub trait Prompter {
    /// Free-form input, optionally pre-filled with an inline default.
    fn input(&self, prompt: &str, default: Option<&str>) -> Option<String>;

    /// Numbered menu over `items`; returns the chosen index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Option<usize>;

    /// Credential input, not echoed to the terminal.
    fn secret(&self, prompt: &str) -> Option<String>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so the pipeline can emit events without
/// depending on the presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Preflight Port ────────────────────────────────────────────────────────────

/// Verifies local prerequisites before any network or privileged action.
pub trait Preflight {
    /// # Errors
    ///
    /// Returns a [`crate::domain::error::DependencyError`] naming the first
    /// missing prerequisite.
    fn check(&self) -> Result<()>;
}

// ── Inventory Store Port ──────────────────────────────────────────────────────

/// Abstracts creation of the ephemeral inventory artifact.
pub trait InventoryStore {
    /// Render and persist the inventory for `target`.
    ///
    /// Returns `(path, guard)` where `guard` removes the artifact when
    /// dropped — the cleanup guarantee rides on scoped ownership, so the
    /// artifact disappears on success and failure paths alike.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be created or written.
    fn write(&self, target: &Target, ssh_user: &str) -> Result<(PathBuf, Box<dyn Any>)>;
}

// ── Orchestrator Port ─────────────────────────────────────────────────────────

/// The hand-off boundary to the external orchestration engine.
///
/// This core's only outward effect is producing (resolved configuration,
/// inventory artifact) and driving one engine run through this trait.
#[allow(async_fn_in_trait)]
pub trait Orchestrator {
    /// Install the engine's declared collection dependencies from its
    /// manifest. Routine output is suppressed; failure is surfaced.
    async fn install_requirements(&self) -> Result<()>;

    /// Run the engine against `inventory` with the resolved configuration,
    /// inheriting the terminal. Returns the engine's own exit status.
    async fn apply(&self, inventory: &Path, config: &ResolvedConfig) -> Result<ExitStatus>;
}
