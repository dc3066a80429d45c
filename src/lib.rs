//! Redactor Library
//!
//! Institutional press-content generation: an HTTP relay in front of a
//! chat completion provider, and the client that drives it

pub mod client;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{ClientSettings, Settings};
pub use handlers::{build_router, create_router, AppState};
pub use providers::{CompletionProvider, OpenAIProvider};
pub use services::GenerationRelay;
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
