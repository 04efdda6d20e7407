//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Messages carry remediation hints
//! because they are the last thing the operator sees before exit 1.

use thiserror::Error;

// ── Usage errors ──────────────────────────────────────────────────────────────

/// Operator input errors — reported immediately, before any external action.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("No target host given. Pass -t <host>, or --local for a local deployment.")]
    MissingTarget,

    #[error("Unknown provider '{name}'. Valid providers: {valid}")]
    UnknownProvider { name: String, valid: String },
}

// ── Dependency errors ─────────────────────────────────────────────────────────

/// Missing local prerequisites — reported before any network or privileged
/// action so the run fails cheaply.
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("Required executable not found on PATH: {name}\nInstall Ansible first, e.g.: pipx install --include-deps ansible")]
    MissingExecutable { name: String },

    #[error("Wordlist not found: {path}\nDownload it into the working directory:\n  curl -LO https://www.eff.org/files/2016/07/18/eff_large_wordlist.txt")]
    MissingWordlist { path: String },
}

// ── Orchestration errors ──────────────────────────────────────────────────────

/// Failures from the orchestration engine's dependency-installation step.
///
/// A non-zero exit from the playbook run itself is not an error value — its
/// status code is propagated unchanged as the process exit code.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("ansible-galaxy collection install failed:\n{stderr}")]
    RequirementsInstall { stderr: String },
}
