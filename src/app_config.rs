use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Correction config
    pub correction: CorrectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Correction provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: Mock (tests and dry runs)
    Mock,
}

impl CorrectionProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for CorrectionProvider
impl std::fmt::Display for CorrectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for CorrectionProvider
impl std::str::FromStr for CorrectionProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Rendering convention for the annotated output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Rebuild output from word sequences with single-space joins
    #[default]
    WordStream,
    /// Map flagged spans back onto exact character offsets of the original text
    OffsetPreserving,
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Backoff base for retries (milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: CorrectionProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(),
            endpoint: default_endpoint(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Correction service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorrectionConfig {
    /// Correction provider to use
    #[serde(default)]
    pub provider: CorrectionProvider,

    /// Available correction providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common correction settings
    #[serde(default)]
    pub common: CorrectionCommonConfig,
}

impl CorrectionConfig {
    /// Get the configuration block for the active provider, if present
    pub fn active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            provider: CorrectionProvider::default(),
            available_providers: vec![
                ProviderConfig::new(CorrectionProvider::Ollama),
                ProviderConfig::new(CorrectionProvider::Mock),
            ],
            common: CorrectionCommonConfig::default(),
        }
    }
}

/// Common correction settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorrectionCommonConfig {
    /// Instruction prefix sent before each chunk
    /// The chunk text is appended verbatim after this prefix
    #[serde(default = "default_instruction")]
    pub instruction: String,

    /// Maximum tokens per chunk sent to the correction model
    #[serde(default = "default_token_budget")]
    pub token_budget: usize,

    /// Soft cap on generated output length, in tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: usize,

    /// How flagged spans are rendered
    #[serde(default)]
    pub render_mode: RenderMode,
}

impl Default for CorrectionCommonConfig {
    fn default() -> Self {
        Self {
            instruction: default_instruction(),
            token_budget: default_token_budget(),
            max_output_tokens: default_max_output_tokens(),
            render_mode: RenderMode::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_model() -> String {
    "grammarly-coedit:latest".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_instruction() -> String {
    "Fix grammar: ".to_string()
}

fn default_token_budget() -> usize {
    64
}

fn default_max_output_tokens() -> usize {
    128
}

impl Default for Config {
    fn default() -> Self {
        Self {
            correction: CorrectionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration, failing fast before any chunk is processed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.correction.common.token_budget < 1 {
            return Err(ConfigError::InvalidTokenBudget(
                self.correction.common.token_budget as i64,
            ));
        }

        if self.correction.common.max_output_tokens < 1 {
            return Err(ConfigError::InvalidMaxOutputTokens(
                self.correction.common.max_output_tokens as i64,
            ));
        }

        let provider_str = self.correction.provider.to_lowercase_string();
        let provider_config = self
            .correction
            .available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
            .ok_or_else(|| ConfigError::UnknownProvider(provider_str.clone()))?;

        if self.correction.provider == CorrectionProvider::Ollama {
            url::Url::parse(&provider_config.endpoint).map_err(|e| {
                ConfigError::InvalidEndpoint {
                    endpoint: provider_config.endpoint.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}
