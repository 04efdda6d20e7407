//! Deployment configuration — the partial record threaded through the
//! resolution stages and its immutable resolved form.

use std::path::PathBuf;

use crate::domain::provider::Provider;
use crate::domain::target::Target;

// ── Constants ────────────────────────────────────────────────────────────────

/// SSH login identity used when none is supplied.
pub const DEFAULT_SSH_USER: &str = "root";

/// Substituted for a hosted provider's credential that was never supplied.
/// The deployment will come up, but the agent cannot reach its provider
/// until the key is replaced on the host.
pub const PLACEHOLDER_API_KEY: &str = "changeme";

// ── Partial record ───────────────────────────────────────────────────────────

/// Configuration accumulated from flags, then prompts, then fallbacks.
///
/// Created empty (all `None`/`false`), populated in place by each stage;
/// a field once set is never overwritten by a later stage.
#[derive(Debug, Default, Clone)]
pub struct DeployConfig {
    /// Host to provision; absent implies a local deployment.
    pub target: Option<String>,
    /// Explicit local-mode flag.
    pub local: bool,
    /// Remote login identity.
    pub ssh_user: Option<String>,
    /// Private key for the SSH connection.
    pub ssh_key: Option<PathBuf>,
    /// Prompt for SSH/become passwords at invocation time instead of key auth.
    pub ask_pass: bool,
    /// Network range allowed to reach administrative services.
    pub mgmt_cidr: Option<String>,
    /// Model-serving integration to configure.
    pub provider: Option<Provider>,
    /// Model identifier.
    pub model: Option<String>,
    /// Provider API base URL.
    pub api_url: Option<String>,
    /// Provider API credential.
    pub api_key: Option<String>,
}

impl DeployConfig {
    /// Current target resolution. Re-evaluated live because an interactive
    /// answer may change it mid-resolution.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        Target::resolve(self.local, self.target.as_deref())
    }
}

// ── Resolved form ────────────────────────────────────────────────────────────

/// Fully resolved configuration.
///
/// Immutable once built; the inventory generator and the orchestrator
/// invoker consume it read-only.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub target: Target,
    pub ssh_user: String,
    pub ssh_key: Option<PathBuf>,
    pub ask_pass: bool,
    pub mgmt_cidr: Option<String>,
    pub provider: Provider,
    pub model: String,
    pub api_url: Option<String>,
    pub api_key: String,
}

impl ResolvedConfig {
    /// The `--extra-vars` payload: space-separated `key='value'` pairs.
    ///
    /// Every value is individually quoted so embedded whitespace and shell
    /// metacharacters survive the trip through the engine unmangled. Unset
    /// optional values travel as empty strings so the playbook's own
    /// defaults apply.
    #[must_use]
    pub fn extra_vars(&self) -> String {
        let pairs = [
            ("llm_provider", self.provider.name()),
            ("llm_model", self.model.as_str()),
            ("llm_url", self.api_url.as_deref().unwrap_or("")),
            ("llm_key", self.api_key.as_str()),
            ("mgmt_cidr", self.mgmt_cidr.as_deref().unwrap_or("")),
        ];
        pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", shell_quote(value)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Wrap a value in single quotes for the `--extra-vars` string.
///
/// Embedded single quotes become `'\''` (close, escaped quote, reopen), the
/// only character that needs treatment inside single quotes.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn resolved(provider: Provider) -> ResolvedConfig {
        ResolvedConfig {
            target: Target::Local,
            ssh_user: DEFAULT_SSH_USER.to_string(),
            ssh_key: None,
            ask_pass: false,
            mgmt_cidr: None,
            provider,
            model: provider.profile().default_model.to_string(),
            api_url: None,
            api_key: "sk-test".to_string(),
        }
    }

    // ── shell_quote ──────────────────────────────────────────────────────────

    #[test]
    fn test_shell_quote_plain_value_is_wrapped() {
        assert_eq!(shell_quote("anthropic"), "'anthropic'");
    }

    #[test]
    fn test_shell_quote_empty_value_is_empty_quotes() {
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_shell_quote_embedded_single_quote_is_escaped() {
        assert_eq!(shell_quote("o'brien"), r"'o'\''brien'");
    }

    #[test]
    fn test_shell_quote_spaces_and_metacharacters_survive() {
        assert_eq!(shell_quote("a b;$(x)"), "'a b;$(x)'");
    }

    // ── extra_vars ───────────────────────────────────────────────────────────

    #[test]
    fn test_extra_vars_contains_all_five_keys() {
        let vars = resolved(Provider::Anthropic).extra_vars();
        for key in ["llm_provider=", "llm_model=", "llm_url=", "llm_key=", "mgmt_cidr="] {
            assert!(vars.contains(key), "missing {key} in: {vars}");
        }
    }

    #[test]
    fn test_extra_vars_quotes_each_value_individually() {
        let mut config = resolved(Provider::Anthropic);
        config.model = "claude-3-5-sonnet-20240620".to_string();
        let vars = config.extra_vars();
        assert!(vars.contains("llm_provider='anthropic'"), "got: {vars}");
        assert!(
            vars.contains("llm_model='claude-3-5-sonnet-20240620'"),
            "got: {vars}"
        );
        assert!(vars.contains("llm_key='sk-test'"), "got: {vars}");
    }

    #[test]
    fn test_extra_vars_unset_url_and_cidr_travel_as_empty() {
        let vars = resolved(Provider::Anthropic).extra_vars();
        assert!(vars.contains("llm_url=''"), "got: {vars}");
        assert!(vars.contains("mgmt_cidr=''"), "got: {vars}");
    }

    #[test]
    fn test_extra_vars_set_cidr_is_carried() {
        let mut config = resolved(Provider::Ollama);
        config.mgmt_cidr = Some("10.8.0.0/24".to_string());
        assert!(
            config.extra_vars().contains("mgmt_cidr='10.8.0.0/24'"),
            "got: {}",
            config.extra_vars()
        );
    }

    #[test]
    fn test_extra_vars_pairs_are_space_separated() {
        let vars = resolved(Provider::Ollama).extra_vars();
        assert_eq!(vars.split(' ').count(), 5, "got: {vars}");
    }

    // ── DeployConfig::target ─────────────────────────────────────────────────

    #[test]
    fn test_config_target_reflects_local_flag() {
        let config = DeployConfig {
            local: true,
            ..DeployConfig::default()
        };
        assert_eq!(config.target(), Some(Target::Local));
    }

    #[test]
    fn test_config_target_unset_is_none() {
        assert_eq!(DeployConfig::default().target(), None);
    }

    // ── Property tests ───────────────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A quoted value always starts and ends with a quote, and every
            /// interior quote is part of an `'\''` escape.
            #[test]
            fn prop_shell_quote_interior_quotes_always_escaped(
                value in ".{0,64}"
            ) {
                let quoted = shell_quote(&value);
                prop_assert!(quoted.starts_with('\''));
                prop_assert!(quoted.ends_with('\''));
                let interior = &quoted[1..quoted.len() - 1];
                prop_assert!(!interior.replace("'\\''", "").contains('\''),
                    "unescaped quote in: {quoted}");
            }

            /// Quoting is injective on the original value: stripping the
            /// escapes recovers the input exactly.
            #[test]
            fn prop_shell_quote_round_trips(value in ".{0,64}") {
                let quoted = shell_quote(&value);
                let interior = &quoted[1..quoted.len() - 1];
                prop_assert_eq!(interior.replace("'\\''", "'"), value);
            }
        }
    }
}
