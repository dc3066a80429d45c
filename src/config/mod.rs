//! Configuration management module
//!
//! Loads relay and client settings from environment variables

pub mod settings;

pub use settings::{
    ClientSettings, GenerationConfig, LoggingConfig, ProviderConfig, ProviderKind, RequestConfig,
    SecurityConfig, ServerConfig, Settings,
};
