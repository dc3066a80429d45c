//! Service layer module
//!
//! Contains the prompt builder and the generation relay

pub mod prompt;
pub mod relay;

pub use relay::GenerationRelay;
