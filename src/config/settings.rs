use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modules::memory::embedding;

const ENV_PREFIX: &str = "COMPANION_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Temperature {0} out of range (must be between 0.0 and 2.0)")]
    TemperatureOutOfRange(f32),

    #[error("top_p {0} out of range (must be in (0.0, 1.0])")]
    TopPOutOfRange(f32),

    #[error("max_tokens must be positive")]
    ZeroMaxTokens,

    #[error("max_memory_entries must be positive")]
    NonPositiveMemoryEntries,

    #[error("Unknown vector store backend: {0} (expected disabled, local or remote)")]
    UnknownVectorStore(String),

    #[error("Unsupported embedding model identifier: {0}")]
    UnsupportedEmbeddingModel(String),

    #[error("Custom events file not readable: {path}: {reason}")]
    CustomEventsUnreadable { path: PathBuf, reason: String },

    #[error("Invalid listen address: {0}")]
    InvalidListenAddr(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnvValue { name: String, value: String },

    #[error("Failed to read config file {path}: {reason}")]
    FileUnreadable { path: PathBuf, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    FileInvalid { path: PathBuf, reason: String },
}

/// Semantic index backend selector. `Disabled` is a first-class mode, not an
/// error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreKind {
    Disabled,
    Local,
    Remote,
}

impl VectorStoreKind {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "disabled" => Ok(VectorStoreKind::Disabled),
            "local" => Ok(VectorStoreKind::Local),
            "remote" => Ok(VectorStoreKind::Remote),
            other => Err(ConfigError::UnknownVectorStore(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,

    pub memory_file: PathBuf,

    pub vector_store: VectorStoreKind,
    pub qdrant_url: String,
    pub qdrant_api_key: String,
    pub embedding_model: String,
    pub max_memory_entries: usize,

    pub custom_events_file: Option<PathBuf>,
    pub tone_decoration: bool,

    pub listen_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".to_string(),
            api_key: "not-needed".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 512,
            top_p: 1.0,
            memory_file: PathBuf::from("data/memories/memory.json"),
            vector_store: VectorStoreKind::Local,
            qdrant_url: "http://localhost:6333".to_string(),
            qdrant_api_key: String::new(),
            embedding_model: embedding::DEFAULT_MODEL.to_string(),
            max_memory_entries: 5,
            custom_events_file: None,
            tone_decoration: false,
            listen_addr: "127.0.0.1:8096".to_string(),
        }
    }
}

impl Settings {
    /// Resolves the configuration once at startup: optional TOML file, then
    /// `COMPANION_*` environment overrides, then validation. Invalid values
    /// fail here rather than at first use.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::FileInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_var("BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = env_var("API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = env_var("MODEL") {
            self.model = v;
        }
        if let Some(v) = env_var("TEMPERATURE") {
            self.temperature = parse_env("TEMPERATURE", &v)?;
        }
        if let Some(v) = env_var("MAX_TOKENS") {
            self.max_tokens = parse_env("MAX_TOKENS", &v)?;
        }
        if let Some(v) = env_var("TOP_P") {
            self.top_p = parse_env("TOP_P", &v)?;
        }
        if let Some(v) = env_var("MEMORY_FILE") {
            self.memory_file = PathBuf::from(v);
        }
        if let Some(v) = env_var("VECTOR_STORE") {
            self.vector_store = VectorStoreKind::parse(&v)?;
        }
        if let Some(v) = env_var("QDRANT_URL") {
            self.qdrant_url = v;
        }
        if let Some(v) = env_var("QDRANT_API_KEY") {
            self.qdrant_api_key = v;
        }
        if let Some(v) = env_var("EMBEDDING_MODEL") {
            self.embedding_model = v;
        }
        if let Some(v) = env_var("MAX_MEMORY_ENTRIES") {
            self.max_memory_entries = parse_env("MAX_MEMORY_ENTRIES", &v)?;
        }
        if let Some(v) = env_var("CUSTOM_EVENTS_FILE") {
            self.custom_events_file = Some(PathBuf::from(v));
        }
        if let Some(v) = env_var("TONE_DECORATION") {
            self.tone_decoration = parse_env("TONE_DECORATION", &v)?;
        }
        if let Some(v) = env_var("LISTEN_ADDR") {
            self.listen_addr = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::InvalidUrl {
                field: "base_url",
                value: self.base_url.clone(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::TemperatureOutOfRange(self.temperature));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::TopPOutOfRange(self.top_p));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if self.max_memory_entries == 0 {
            return Err(ConfigError::NonPositiveMemoryEntries);
        }
        if self.vector_store == VectorStoreKind::Remote
            && reqwest::Url::parse(&self.qdrant_url).is_err()
        {
            return Err(ConfigError::InvalidUrl {
                field: "qdrant_url",
                value: self.qdrant_url.clone(),
            });
        }
        if self.vector_store != VectorStoreKind::Disabled
            && embedding::parse_identifier(&self.embedding_model).is_none()
        {
            return Err(ConfigError::UnsupportedEmbeddingModel(
                self.embedding_model.clone(),
            ));
        }
        if let Some(path) = &self.custom_events_file {
            if let Err(e) = std::fs::metadata(path) {
                return Err(ConfigError::CustomEventsUnreadable {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidListenAddr(self.listen_addr.clone()));
        }
        Ok(())
    }
}

fn env_var(suffix: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{suffix}")).ok()
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnvValue {
        name: format!("{ENV_PREFIX}{name}"),
        value: value.to_string(),
    })
}
