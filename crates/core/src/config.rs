use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f32(key: &str, default: f32) -> f32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub ollama: OllamaConfig,
    pub summarize: SummarizeConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            llm: LlmConfig::from_env(),
            ollama: OllamaConfig::from_env(),
            summarize: SummarizeConfig::from_env(),
        }
    }

    /// Reject configurations that cannot run. Called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.summarize.validate()
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  llm:        provider={}", self.llm.provider);
        tracing::info!("  ollama:     url={}, model={}", self.ollama.url, self.ollama.model);
        tracing::info!(
            "  summarize:  chunk_size={}u, overlap={}u, estimator={}, concurrency={}",
            self.summarize.chunk_size_units,
            self.summarize.overlap_units,
            self.summarize.estimator,
            self.summarize.max_concurrency,
        );
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk size bound must be positive")]
    InvalidChunkBound,

    #[error("overlap of {overlap} units must be smaller than the chunk bound of {bound}")]
    OverlapTooLarge { overlap: usize, bound: usize },

    #[error("unknown size estimator '{0}' (expected 'coarse' or 'weighted')")]
    UnknownEstimator(String),
}

// ── LLM (OpenAI / Anthropic / Ollama) ─────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai", "anthropic", "ollama"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            provider: env_or("LLM_PROVIDER", "ollama"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            openai_base_url: env_opt("OPENAI_BASE_URL"),
            anthropic_api_key: env_opt("ANTHROPIC_API_KEY"),
            anthropic_model: env_or("ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929"),
            temperature: env_f32("LLM_TEMPERATURE", 0.2),
            max_tokens: env_u32("LLM_MAX_TOKENS", 1024),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "anthropic" => self.anthropic_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

impl OllamaConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("OLLAMA_URL", "http://localhost:11434"),
            model: env_or("OLLAMA_MODEL", "llama3.2"),
        }
    }
}

// ── Summarization pipeline ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeConfig {
    /// Chunk size bound, in size-estimator units.
    pub chunk_size_units: usize,
    /// Overlap between adjacent chunks, in the same units.
    pub overlap_units: usize,
    /// "coarse" or "weighted".
    pub estimator: String,
    /// Upper bound on concurrent map-stage calls.
    pub max_concurrency: usize,
    /// Directory of prompt template overrides.
    pub prompts_dir: Option<String>,
}

impl SummarizeConfig {
    fn from_env() -> Self {
        Self {
            chunk_size_units: env_usize("CONDENSE_CHUNK_SIZE", 1000),
            overlap_units: env_usize("CONDENSE_OVERLAP", 100),
            estimator: env_or("CONDENSE_ESTIMATOR", "coarse"),
            max_concurrency: env_usize("CONDENSE_MAX_CONCURRENCY", 4),
            prompts_dir: env_opt("CONDENSE_PROMPTS_DIR"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size_units == 0 {
            return Err(ConfigError::InvalidChunkBound);
        }
        if self.overlap_units >= self.chunk_size_units {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap_units,
                bound: self.chunk_size_units,
            });
        }
        match self.estimator.as_str() {
            "coarse" | "weighted" => Ok(()),
            other => Err(ConfigError::UnknownEstimator(other.to_string())),
        }
    }
}
