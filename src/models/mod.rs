//! Data models module
//!
//! Wire bodies of the relay, its sibling endpoints and the completion provider

pub mod article;
pub mod catalog;
pub mod completion;
pub mod content;

pub use article::{Article, ExportFormat};
pub use catalog::FieldSchema;
pub use content::{ContentRequest, ErrorBody, GenerateRequest, GenerateResponse, GenerationResult};
