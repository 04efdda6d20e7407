//! Configuration resolution stages.
//!
//! Three passes over the same [`DeployConfig`], in order: interactive
//! prompts (TTY runs only), static fallbacks, then the single hard
//! validation. A field set by an earlier source is never overwritten.

use std::path::PathBuf;

use crate::application::ports::Prompter;
use crate::domain::error::UsageError;
use crate::domain::{
    DeployConfig, KeyPolicy, Provider, ResolvedConfig, UrlPolicy, DEFAULT_SSH_USER,
    PLACEHOLDER_API_KEY,
};

// ── Interactive pass ─────────────────────────────────────────────────────────

/// Prompt for every field still unset, in a fixed order:
/// target → user → key → provider → model → URL → credential.
///
/// Prompt failures (closed stream) leave the field unset; the fallback
/// resolver and validator decide the outcome.
pub fn resolve_interactive(config: &mut DeployConfig, prompter: &impl Prompter) {
    // Target: only when not already in local mode.
    if config.target().is_none() {
        config.target = prompter
            .input("Target host to provision", None)
            .filter(|s| !s.is_empty());
    }

    if config.ssh_user.is_none() {
        config.ssh_user = prompter.input("SSH user", Some(DEFAULT_SSH_USER));
    }

    // Key-based auth and --ask-pass are mutually exclusive; the key prompt
    // is skipped entirely when password prompting was requested.
    if config.ssh_key.is_none() && !config.ask_pass {
        config.ssh_key = prompter
            .input("SSH private key path (blank to use the agent/default key)", None)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
    }

    if config.provider.is_none() {
        config.provider = Some(prompt_provider(prompter));
    }
    let profile = config.provider.unwrap_or(Provider::DEFAULT).profile();

    if config.model.is_none() {
        config.model = prompter.input("Model", Some(profile.default_model));
    }

    if config.api_url.is_none() {
        config.api_url = match profile.url {
            UrlPolicy::None => None,
            UrlPolicy::Fixed(url) => Some(url.to_string()),
            UrlPolicy::PromptWithDefault(default) => {
                prompter.input("API base URL", Some(default))
            }
            UrlPolicy::PromptRequired => prompter
                .input("API base URL", None)
                .filter(|s| !s.is_empty()),
        };
    }

    if config.api_key.is_none() {
        config.api_key = match profile.key {
            KeyPolicy::Fixed(key) => Some(key.to_string()),
            KeyPolicy::Prompt => prompter.secret("API key").filter(|s| !s.is_empty()),
        };
    }
}

/// Numbered provider menu; any non-selection resolves to the default.
fn prompt_provider(prompter: &impl Prompter) -> Provider {
    let names: Vec<&str> = Provider::ALL.iter().map(|p| p.name()).collect();
    let default_idx = Provider::ALL
        .iter()
        .position(|p| *p == Provider::DEFAULT)
        .unwrap_or(0);
    let idx = prompter
        .select("Model provider", &names, default_idx)
        .unwrap_or(default_idx);
    Provider::ALL.get(idx).copied().unwrap_or(Provider::DEFAULT)
}

// ── Fallback pass ────────────────────────────────────────────────────────────

/// Fill every field still unset with its static fallback, so a
/// non-interactive run never blocks on a prompt and never reaches the
/// invoker with a required field missing.
pub fn resolve_fallbacks(config: &mut DeployConfig) {
    if config.ssh_user.is_none() {
        config.ssh_user = Some(DEFAULT_SSH_USER.to_string());
    }

    let provider = *config.provider.get_or_insert(Provider::DEFAULT);
    let profile = provider.profile();

    if config.model.is_none() {
        config.model = Some(profile.default_model.to_string());
    }

    if config.api_url.is_none() {
        config.api_url = match profile.url {
            UrlPolicy::Fixed(url) | UrlPolicy::PromptWithDefault(url) => Some(url.to_string()),
            UrlPolicy::None | UrlPolicy::PromptRequired => None,
        };
    }

    if config.api_key.is_none() {
        config.api_key = Some(match profile.key {
            KeyPolicy::Fixed(key) => key.to_string(),
            KeyPolicy::Prompt => PLACEHOLDER_API_KEY.to_string(),
        });
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// The single hard precondition: a resolvable target, unless deploying
/// locally. Runs after the fallback pass, so every other field is filled.
///
/// # Errors
///
/// Returns [`UsageError::MissingTarget`] when no target can be determined.
pub fn validate(config: &DeployConfig) -> Result<ResolvedConfig, UsageError> {
    let target = config.target().ok_or(UsageError::MissingTarget)?;
    let provider = config.provider.unwrap_or(Provider::DEFAULT);
    let profile = provider.profile();

    Ok(ResolvedConfig {
        target,
        ssh_user: config
            .ssh_user
            .clone()
            .unwrap_or_else(|| DEFAULT_SSH_USER.to_string()),
        ssh_key: config.ssh_key.clone(),
        ask_pass: config.ask_pass,
        mgmt_cidr: config.mgmt_cidr.clone(),
        provider,
        model: config
            .model
            .clone()
            .unwrap_or_else(|| profile.default_model.to_string()),
        api_url: config.api_url.clone(),
        api_key: config
            .api_key
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string()),
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
