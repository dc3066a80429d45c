//! Client library
//!
//! Everything the front-end does against the relay: the generation form,
//! the writing page with its article actions, and audio transcription

pub mod api;
pub mod article;
pub mod error;
pub mod form;
pub mod page;
pub mod ticker;
pub mod transcription;

pub use api::{GenerationApi, RelayClient};
pub use article::{ArticleClient, ExportedDocument};
pub use error::{ClientError, ErrorReport, CONNECTIVITY_MESSAGE};
pub use form::{FormDraft, FormEvent, FormView, GenerationForm, SubmitOutcome, ValidationError};
pub use page::WritingPage;
pub use ticker::PhraseTicker;
pub use transcription::{AudioSource, TranscriptionClient};
