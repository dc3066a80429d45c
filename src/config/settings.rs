//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Main relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Completion provider configuration
    pub provider: ProviderConfig,
    /// Fixed generation parameters
    pub generation: GenerationConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Which wire dialect the completion provider speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Azure OpenAI deployment-based routing with `api-key` header
    Azure,
    /// OpenAI-compatible `/chat/completions` with bearer auth
    OpenAi,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "azure" => Ok(ProviderKind::Azure),
            "openai" => Ok(ProviderKind::OpenAi),
            other => anyhow::bail!("Unknown provider kind: {}", other),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Azure => f.write_str("azure"),
            ProviderKind::OpenAi => f.write_str("openai"),
        }
    }
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider dialect
    pub kind: ProviderKind,
    /// Endpoint URL (Azure resource URL or OpenAI-compatible base URL)
    pub endpoint: String,
    /// Access credential
    pub api_key: String,
    /// Deployment (Azure) or model (OpenAI) identifier
    pub deployment: String,
    /// Azure API version query parameter
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Generation parameters applied to every completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 800,
        }
    }
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// Missing provider endpoint, key or deployment is a startup error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} environment variable not set", key))
        };

        let settings = Self {
            server: ServerConfig {
                host: get_or("SERVER_HOST", "0.0.0.0"),
                port: get_or("PORT", "3001")
                    .parse()
                    .context("Invalid port number")?,
            },
            provider: ProviderConfig {
                kind: get_or("PROVIDER_KIND", "azure").parse()?,
                endpoint: required("AZURE_OPENAI_ENDPOINT")?,
                api_key: required("AZURE_OPENAI_KEY")?,
                deployment: required("AZURE_OPENAI_DEPLOYMENT")?,
                api_version: get_or("AZURE_OPENAI_API_VERSION", "2024-06-01"),
                timeout: get_or("REQUEST_TIMEOUT", "60")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            generation: GenerationConfig {
                temperature: get_or("GENERATION_TEMPERATURE", "0.7")
                    .parse()
                    .context("Invalid generation temperature")?,
                max_tokens: get_or("GENERATION_MAX_TOKENS", "800")
                    .parse()
                    .context("Invalid generation max tokens")?,
            },
            request: RequestConfig {
                max_request_size: get_or("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_or("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get_or("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_or("RUST_LOG", "info"),
                format: get_or("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.provider.api_key.contains(char::is_whitespace) {
            anyhow::bail!("Provider API key cannot contain whitespace characters");
        }

        if !self.provider.endpoint.starts_with("http") {
            anyhow::bail!("Invalid provider endpoint format, should start with 'http'");
        }

        if self.provider.kind == ProviderKind::Azure && self.provider.api_version.trim().is_empty() {
            anyhow::bail!("Azure API version cannot be empty");
        }

        if self.provider.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            anyhow::bail!("Generation temperature must be between 0.0 and 2.0");
        }

        if self.generation.max_tokens == 0 {
            anyhow::bail!("Generation max tokens must be greater than 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Same directive syntax the subscriber is initialised with
        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log level: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Listen address as `host:port`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Client-side configuration: the relay base URL every API path is joined to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Relay base URL, e.g. `http://localhost:3001`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientSettings {
    /// Create client settings pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 120,
        }
    }

    /// Load client settings from `REDACTOR_API_URL` / `REDACTOR_CLIENT_TIMEOUT`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = std::env::var("REDACTOR_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());
        if !base_url.starts_with("http") {
            anyhow::bail!("Invalid relay base URL format, should start with 'http'");
        }

        let timeout = std::env::var("REDACTOR_CLIENT_TIMEOUT")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .context("Invalid client timeout")?;

        Ok(Self { base_url, timeout })
    }

    /// Join a relative API path to the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
