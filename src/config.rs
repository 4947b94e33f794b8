//! Command-line flags and the validated runtime configuration.

use std::time::Duration;

use clap::Parser;

use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig};

#[derive(Debug, Parser)]
#[command(name = "support-line", version, about = "Console support desk with triage and specialist agents")]
pub struct Cli {
    /// API key for the chat-completions endpoint
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenAI-compatible base URL
    #[arg(long, env = "SUPPORT_LINE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used to phrase specialist answers
    #[arg(long, env = "SUPPORT_LINE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is missing: set it in the environment or pass --api-key")]
    MissingCredential,
    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub debug: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        if cli.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            llm: LlmConfig {
                base_url: cli.base_url,
                model: cli.model,
                api_key,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            debug: cli.debug,
        })
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "warn" }
    }
}
