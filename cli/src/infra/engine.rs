//! Ansible as the orchestration engine.

use std::path::Path;
use std::process::ExitStatus;

use anyhow::Result;

use crate::application::ports::{CommandRunner, Orchestrator};
use crate::domain::error::OrchestrationError;
use crate::domain::ResolvedConfig;

/// Playbook driving the hardening run, expected in the working directory.
pub const PLAYBOOK_FILE: &str = "playbook.yml";

/// Collection manifest installed before the run.
pub const REQUIREMENTS_FILE: &str = "requirements.yml";

/// Production [`Orchestrator`] shelling out to `ansible-galaxy` and
/// `ansible-playbook` through a [`CommandRunner`].
pub struct AnsibleEngine<R> {
    runner: R,
}

impl<R: CommandRunner> AnsibleEngine<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> Orchestrator for AnsibleEngine<R> {
    async fn install_requirements(&self) -> Result<()> {
        // Captured, not inherited: routine galaxy output is noise, but its
        // stderr matters when the install fails.
        let output = self
            .runner
            .run(
                "ansible-galaxy",
                &["collection", "install", "-r", REQUIREMENTS_FILE],
            )
            .await?;
        if !output.status.success() {
            return Err(OrchestrationError::RequirementsInstall {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }
        Ok(())
    }

    async fn apply(&self, inventory: &Path, config: &ResolvedConfig) -> Result<ExitStatus> {
        let inventory_arg = inventory.to_string_lossy();
        let extra_vars = config.extra_vars();
        let key_arg = config.ssh_key.as_ref().map(|key| key.to_string_lossy());

        let mut args: Vec<&str> = vec![
            "-i",
            inventory_arg.as_ref(),
            PLAYBOOK_FILE,
            "--extra-vars",
            extra_vars.as_str(),
        ];
        if let Some(key) = key_arg.as_deref() {
            args.push("--private-key");
            args.push(key);
        }
        if config.ask_pass {
            args.extend(["--ask-pass", "--ask-become-pass"]);
        }

        // Inherited stdio: the engine's own prompts and task output belong
        // to the operator's terminal.
        self.runner.run_status("ansible-playbook", &args).await
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::path::PathBuf;
    use std::process::Output;
    use std::sync::Mutex;

    use crate::domain::{Provider, Target, DEFAULT_SSH_USER};

    /// Runner double recording every invocation.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        fail_captured: bool,
    }

    impl RecordingRunner {
        fn failing_captured() -> Self {
            Self {
                fail_captured: true,
                ..Self::default()
            }
        }

        fn record(&self, program: &str, args: &[&str]) {
            self.calls.lock().unwrap().push((
                program.to_string(),
                args.iter().map(ToString::to_string).collect(),
            ));
        }

        fn calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
            self.record(program, args);
            let status = if self.fail_captured {
                ExitStatus::from_raw(1 << 8)
            } else {
                ExitStatus::from_raw(0)
            };
            Ok(Output {
                status,
                stdout: Vec::new(),
                stderr: b"galaxy said no".to_vec(),
            })
        }

        async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
            self.record(program, args);
            Ok(ExitStatus::from_raw(0))
        }
    }

    fn resolved() -> ResolvedConfig {
        ResolvedConfig {
            target: Target::Remote {
                addr: "10.0.0.5".to_string(),
            },
            ssh_user: DEFAULT_SSH_USER.to_string(),
            ssh_key: None,
            ask_pass: false,
            mgmt_cidr: None,
            provider: Provider::Ollama,
            model: "llama3.1".to_string(),
            api_url: Some("http://localhost:11434".to_string()),
            api_key: "ollama".to_string(),
        }
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    // ── install_requirements ─────────────────────────────────────────────────

    #[test]
    fn test_install_requirements_invokes_galaxy_with_manifest() {
        let runner = RecordingRunner::default();
        let engine = AnsibleEngine::new(runner);
        block_on(engine.install_requirements()).unwrap();
        let calls = engine.runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ansible-galaxy");
        assert_eq!(
            calls[0].1,
            ["collection", "install", "-r", "requirements.yml"]
        );
    }

    #[test]
    fn test_install_requirements_failure_surfaces_stderr() {
        let engine = AnsibleEngine::new(RecordingRunner::failing_captured());
        let err = block_on(engine.install_requirements()).unwrap_err();
        assert!(err.to_string().contains("galaxy said no"), "got: {err}");
    }

    // ── apply ────────────────────────────────────────────────────────────────

    #[test]
    fn test_apply_passes_inventory_playbook_and_extra_vars() {
        let engine = AnsibleEngine::new(RecordingRunner::default());
        let inventory = PathBuf::from("/tmp/garrison-inventory-x.ini");
        block_on(engine.apply(&inventory, &resolved())).unwrap();

        let calls = engine.runner.calls();
        assert_eq!(calls[0].0, "ansible-playbook");
        let args = &calls[0].1;
        assert_eq!(args[0], "-i");
        assert_eq!(args[1], "/tmp/garrison-inventory-x.ini");
        assert_eq!(args[2], "playbook.yml");
        assert_eq!(args[3], "--extra-vars");
        assert!(args[4].contains("llm_provider='ollama'"), "got: {}", args[4]);
        assert!(args[4].contains("llm_model='llama3.1'"), "got: {}", args[4]);
    }

    #[test]
    fn test_apply_without_key_or_ask_pass_adds_no_auth_flags() {
        let engine = AnsibleEngine::new(RecordingRunner::default());
        block_on(engine.apply(Path::new("/tmp/inv.ini"), &resolved())).unwrap();
        let args = &engine.runner.calls()[0].1;
        assert!(!args.contains(&"--private-key".to_string()));
        assert!(!args.contains(&"--ask-pass".to_string()));
    }

    #[test]
    fn test_apply_with_ssh_key_appends_private_key_argument() {
        let mut config = resolved();
        config.ssh_key = Some(PathBuf::from("/home/op/.ssh/id_ed25519"));
        let engine = AnsibleEngine::new(RecordingRunner::default());
        block_on(engine.apply(Path::new("/tmp/inv.ini"), &config)).unwrap();
        let args = &engine.runner.calls()[0].1;
        let idx = args.iter().position(|a| a == "--private-key").unwrap();
        assert_eq!(args[idx + 1], "/home/op/.ssh/id_ed25519");
    }

    #[test]
    fn test_apply_with_ask_pass_requests_both_password_prompts() {
        let mut config = resolved();
        config.ask_pass = true;
        let engine = AnsibleEngine::new(RecordingRunner::default());
        block_on(engine.apply(Path::new("/tmp/inv.ini"), &config)).unwrap();
        let args = &engine.runner.calls()[0].1;
        assert!(args.contains(&"--ask-pass".to_string()));
        assert!(args.contains(&"--ask-become-pass".to_string()));
    }
}
