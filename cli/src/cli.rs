//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::application::deploy;
use crate::domain::error::UsageError;
use crate::domain::{DeployConfig, Provider};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::deps::HostPreflight;
use crate::infra::engine::AnsibleEngine;
use crate::infra::inventory::TempInventoryStore;
use crate::infra::prompter::DialoguerPrompter;
use crate::output::{OutputContext, TerminalReporter};

/// Provision a hardened host for AI agent workloads
#[derive(Parser, Debug)]
#[command(name = "garrison", version, about, long_about = None)]
pub struct Cli {
    /// Host to provision; omit for a local deployment
    #[arg(short = 't', long, value_name = "HOST")]
    pub target: Option<String>,

    /// Model provider to configure on the host
    #[arg(short = 'p', long, value_name = "NAME", value_parser = parse_provider)]
    pub provider: Option<Provider>,

    /// Model identifier (provider-dependent default)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL for the provider API
    #[arg(short = 'u', long, value_name = "URL")]
    pub url: Option<String>,

    /// API key for the provider
    #[arg(short = 'k', long, value_name = "KEY")]
    pub key: Option<String>,

    /// SSH login user for the target host
    #[arg(long, value_name = "USER")]
    pub ssh_user: Option<String>,

    /// Path to the SSH private key for the connection
    #[arg(long, value_name = "PATH")]
    pub ssh_key: Option<PathBuf>,

    /// Network range allowed to reach administrative services
    #[arg(long, value_name = "CIDR")]
    pub mgmt_cidr: Option<String>,

    /// Deploy to this machine instead of a remote host
    #[arg(long)]
    pub local: bool,

    /// Prompt for SSH and privilege-escalation passwords instead of key auth
    #[arg(long)]
    pub ask_pass: bool,

    /// Never prompt; fields missing from the flags take their static defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

fn parse_provider(s: &str) -> Result<Provider, UsageError> {
    s.parse()
}

impl Cli {
    /// Execute the deployment run and return the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution, validation, preflight, or the
    /// engine's requirements install fails.
    pub async fn run(self) -> Result<i32> {
        let ctx = OutputContext::new(self.no_color, self.quiet);
        // Prompts require an operator: an explicit flag, a CI environment,
        // or a non-TTY stdout each force the fallback path.
        let interactive =
            !self.non_interactive && std::env::var_os("CI").is_none() && ctx.is_tty;

        let config = DeployConfig {
            target: self.target,
            local: self.local,
            ssh_user: self.ssh_user,
            ssh_key: self.ssh_key,
            ask_pass: self.ask_pass,
            mgmt_cidr: self.mgmt_cidr,
            provider: self.provider,
            model: self.model,
            api_url: self.url,
            api_key: self.key,
        };

        deploy::run(
            &TerminalReporter::new(&ctx),
            config,
            interactive,
            &DialoguerPrompter,
            &HostPreflight,
            &TempInventoryStore,
            &AnsibleEngine::new(TokioCommandRunner::default()),
        )
        .await
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_all_long_flags() {
        let cli = Cli::try_parse_from([
            "garrison",
            "--target",
            "10.0.0.5",
            "--provider",
            "anthropic",
            "--model",
            "claude-3-5-sonnet-20240620",
            "--url",
            "https://api.example",
            "--key",
            "sk-test",
            "--ssh-user",
            "ubuntu",
            "--ssh-key",
            "/home/op/.ssh/id_ed25519",
            "--mgmt-cidr",
            "10.8.0.0/24",
            "--non-interactive",
        ])
        .unwrap();
        assert_eq!(cli.target.as_deref(), Some("10.0.0.5"));
        assert_eq!(cli.provider, Some(Provider::Anthropic));
        assert_eq!(cli.model.as_deref(), Some("claude-3-5-sonnet-20240620"));
        assert_eq!(cli.url.as_deref(), Some("https://api.example"));
        assert_eq!(cli.key.as_deref(), Some("sk-test"));
        assert_eq!(cli.ssh_user.as_deref(), Some("ubuntu"));
        assert_eq!(cli.mgmt_cidr.as_deref(), Some("10.8.0.0/24"));
        assert!(cli.non_interactive);
    }

    #[test]
    fn test_cli_parses_short_flags() {
        let cli = Cli::try_parse_from([
            "garrison", "-t", "host", "-p", "ollama", "-m", "llama3.1", "-u", "http://x", "-k",
            "key",
        ])
        .unwrap();
        assert_eq!(cli.target.as_deref(), Some("host"));
        assert_eq!(cli.provider, Some(Provider::Ollama));
    }

    #[test]
    fn test_cli_boolean_flags_default_off() {
        let cli = Cli::try_parse_from(["garrison"]).unwrap();
        assert!(!cli.local);
        assert!(!cli.ask_pass);
        assert!(!cli.non_interactive);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_local_flag() {
        let cli = Cli::try_parse_from(["garrison", "--local"]).unwrap();
        assert!(cli.local);
    }

    #[test]
    fn test_cli_unknown_flag_is_a_parse_error() {
        assert!(Cli::try_parse_from(["garrison", "--foo"]).is_err());
    }

    #[test]
    fn test_cli_unknown_provider_is_a_parse_error() {
        let err = Cli::try_parse_from(["garrison", "-p", "frobnicator"]).unwrap_err();
        assert!(
            err.to_string().contains("Unknown provider"),
            "got: {err}"
        );
    }

    #[test]
    fn test_cli_dotted_provider_name_parses() {
        let cli = Cli::try_parse_from(["garrison", "-p", "z.ai"]).unwrap();
        assert_eq!(cli.provider, Some(Provider::ZAi));
    }
}
