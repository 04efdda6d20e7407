//! The deployment pipeline — resolve, validate, render, check, hand off.
//!
//! One strictly forward pass: flags were already absorbed into the partial
//! [`DeployConfig`]; this service runs the remaining stages in order and
//! finishes by mirroring the orchestration engine's exit status. The
//! ephemeral inventory artifact is held through an RAII guard, so it is
//! removed on every exit path after its creation — engine failures included.

use anyhow::Result;

use crate::application::ports::{
    InventoryStore, Orchestrator, Preflight, ProgressReporter, Prompter,
};
use crate::application::resolve;
use crate::domain::{DeployConfig, KeyPolicy, ResolvedConfig, Target, PLACEHOLDER_API_KEY};

/// Run the pipeline to completion and return the process exit code.
///
/// # Errors
///
/// Returns an error for validation, dependency, inventory, or
/// requirements-install failures. A non-zero exit from the engine itself is
/// not an error — it becomes the returned exit code.
pub async fn run(
    reporter: &impl ProgressReporter,
    mut config: DeployConfig,
    interactive: bool,
    prompter: &impl Prompter,
    preflight: &impl Preflight,
    store: &impl InventoryStore,
    engine: &impl Orchestrator,
) -> Result<i32> {
    if interactive {
        resolve::resolve_interactive(&mut config, prompter);
    }
    resolve::resolve_fallbacks(&mut config);
    let resolved = resolve::validate(&config)?;

    warn_placeholder_key(reporter, &resolved);

    match &resolved.target {
        Target::Local => reporter.step("Deploying to this machine"),
        Target::Remote { addr } => {
            reporter.step(&format!("Deploying to {addr} as {}", resolved.ssh_user));
        }
    }
    let (inventory_path, inventory_guard) = store.write(&resolved.target, &resolved.ssh_user)?;

    preflight.check()?;

    reporter.step("Installing collection requirements");
    engine.install_requirements().await?;
    reporter.success("Requirements installed");

    reporter.step("Handing off to the orchestration engine");
    let status = engine.apply(&inventory_path, &resolved).await?;

    // Inventory removal happens here on the completed path, and via drop on
    // each early `?` return above.
    drop(inventory_guard);

    if status.success() {
        reporter.success("Deployment complete");
    }
    Ok(status.code().unwrap_or(1))
}

/// One-line warning when a hosted provider is about to ship with the
/// credential placeholder — the deployment will come up non-functional
/// until a real key lands on the host.
fn warn_placeholder_key(reporter: &impl ProgressReporter, resolved: &ResolvedConfig) {
    if resolved.api_key == PLACEHOLDER_API_KEY
        && matches!(resolved.provider.profile().key, KeyPolicy::Prompt)
    {
        reporter.warn(&format!(
            "No API key supplied for {}; deploying with a placeholder. Pass -k <key> to set one.",
            resolved.provider
        ));
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
