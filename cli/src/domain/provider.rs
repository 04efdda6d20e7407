//! Provider catalogue — the closed set of model-serving integrations.
//!
//! Per-provider defaults (model, base URL, credential policy) live in one
//! static table keyed by the [`Provider`] enum, so downstream stages never
//! branch on provider name strings.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::UsageError;

/// Upstream model-serving integration configured on the target host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    Anthropic,
    OpenAi,
    OpenAiCompatible,
    OpenRouter,
    ZAi,
    Gemini,
}

/// How a provider's API base URL is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlPolicy {
    /// The integration uses its fixed upstream endpoint; no URL travels
    /// through the configuration at all.
    None,
    /// Prompt interactively, pre-filled with a confirmable default; the
    /// default is injected as-is in non-interactive runs.
    PromptWithDefault(&'static str),
    /// Prompt interactively with no default — the endpoint is
    /// deployment-specific and cannot be guessed.
    PromptRequired,
    /// Inject a fixed endpoint without prompting.
    Fixed(&'static str),
}

/// How a provider's API credential is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Fixed literal — the provider performs no real authentication.
    Fixed(&'static str),
    /// Hidden interactive prompt; a placeholder is substituted when the
    /// credential is never supplied.
    Prompt,
}

/// Static defaults for one provider.
pub struct ProviderProfile {
    /// Canonical name, as accepted by `-p/--provider`.
    pub name: &'static str,
    /// Model used when `-m/--model` is not given.
    pub default_model: &'static str,
    /// Base URL resolution policy.
    pub url: UrlPolicy,
    /// Credential resolution policy.
    pub key: KeyPolicy,
}

const OLLAMA: ProviderProfile = ProviderProfile {
    name: "ollama",
    default_model: "llama3.1",
    url: UrlPolicy::PromptWithDefault("http://localhost:11434"),
    key: KeyPolicy::Fixed("ollama"),
};

const ANTHROPIC: ProviderProfile = ProviderProfile {
    name: "anthropic",
    default_model: "claude-sonnet-4-20250514",
    url: UrlPolicy::None,
    key: KeyPolicy::Prompt,
};

const OPENAI: ProviderProfile = ProviderProfile {
    name: "openai",
    default_model: "gpt-4o",
    url: UrlPolicy::None,
    key: KeyPolicy::Prompt,
};

const OPENAI_COMPATIBLE: ProviderProfile = ProviderProfile {
    name: "openai_compatible",
    default_model: "gpt-4o",
    url: UrlPolicy::PromptRequired,
    key: KeyPolicy::Prompt,
};

const OPENROUTER: ProviderProfile = ProviderProfile {
    name: "openrouter",
    default_model: "openrouter/auto",
    url: UrlPolicy::Fixed("https://openrouter.ai/api/v1"),
    key: KeyPolicy::Prompt,
};

const ZAI: ProviderProfile = ProviderProfile {
    name: "z.ai",
    default_model: "glm-4.5",
    url: UrlPolicy::Fixed("https://api.z.ai/api/paas/v4"),
    key: KeyPolicy::Prompt,
};

const GEMINI: ProviderProfile = ProviderProfile {
    name: "gemini",
    default_model: "gemini-2.5-pro",
    url: UrlPolicy::None,
    key: KeyPolicy::Prompt,
};

impl Provider {
    /// All providers, in interactive menu order.
    pub const ALL: [Provider; 7] = [
        Provider::Ollama,
        Provider::Anthropic,
        Provider::OpenAi,
        Provider::OpenAiCompatible,
        Provider::OpenRouter,
        Provider::ZAi,
        Provider::Gemini,
    ];

    /// Fallback when no provider is supplied — the only one that runs
    /// without real credentials.
    pub const DEFAULT: Provider = Provider::Ollama;

    /// Static defaults for this provider.
    #[must_use]
    pub const fn profile(self) -> &'static ProviderProfile {
        match self {
            Provider::Ollama => &OLLAMA,
            Provider::Anthropic => &ANTHROPIC,
            Provider::OpenAi => &OPENAI,
            Provider::OpenAiCompatible => &OPENAI_COMPATIBLE,
            Provider::OpenRouter => &OPENROUTER,
            Provider::ZAi => &ZAI,
            Provider::Gemini => &GEMINI,
        }
    }

    /// Canonical name, as printed and as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.profile().name
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Provider {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| UsageError::UnknownProvider {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
