//! Runtime configuration.
//!
//! Settings start from built-in defaults, are optionally overlaid with a TOML
//! file, and finally with environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{QnaError, QnaResult};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_GEN_MODEL: &str = "llama3.2";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which embedding provider backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Ollama,
    Hashing,
}

impl ProviderKind {
    pub fn parse(s: &str) -> QnaResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "hashing" => Ok(Self::Hashing),
            other => Err(QnaError::config(format!(
                "Invalid provider '{}'. Use: ollama, hashing",
                other
            ))),
        }
    }
}

/// Which record store backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    Redis,
    Memory,
}

impl StoreKind {
    pub fn parse(s: &str) -> QnaResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(QnaError::config(format!(
                "Invalid store '{}'. Use: redis, memory",
                other
            ))),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub redis_url: String,
    pub ollama_url: String,
    pub embed_model: String,
    pub gen_model: String,
    pub provider: ProviderKind,
    pub store: StoreKind,
    pub host: String,
    pub port: u16,
    /// Per-request timeout for provider calls, in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            gen_model: DEFAULT_GEN_MODEL.to_string(),
            provider: ProviderKind::default(),
            store: StoreKind::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file, the default config file, or defaults,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> QnaResult<Self> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> QnaResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QnaError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let settings = Self::from_toml(&raw)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(settings)
    }

    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml(raw: &str) -> QnaResult<Self> {
        toml::from_str(raw).map_err(|e| QnaError::config(e.to_string()))
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> QnaResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("REDIS_URL") {
            self.redis_url = v;
        }
        if let Some(v) = lookup("OLLAMA_URL") {
            self.ollama_url = v;
        }
        if let Some(v) = lookup("OLLAMA_EMBED_MODEL") {
            self.embed_model = v;
        }
        if let Some(v) = lookup("OLLAMA_GEN_MODEL") {
            self.gen_model = v;
        }
        if let Some(v) = lookup("QNABOT_PROVIDER") {
            self.provider = ProviderKind::parse(&v)?;
        }
        if let Some(v) = lookup("QNABOT_STORE") {
            self.store = StoreKind::parse(&v)?;
        }
        if let Some(v) = lookup("QNABOT_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("QNABOT_PORT") {
            self.port = v
                .parse()
                .map_err(|_| QnaError::config(format!("Invalid QNABOT_PORT: {}", v)))?;
        }
        if let Some(v) = lookup("QNABOT_TIMEOUT_SECS") {
            self.timeout_secs = v
                .parse()
                .map_err(|_| QnaError::config(format!("Invalid QNABOT_TIMEOUT_SECS: {}", v)))?;
        }
        Ok(())
    }
}

/// `<config dir>/qnabot/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("qnabot").join("config.toml"))
}
