//! Generation form
//!
//! The draft is an immutable value replaced on every edit; validation is a
//! pure function of draft and schema; the view is a projection of the
//! current phase. Results are announced as `FormEvent`s to whoever
//! subscribed.

use crate::client::api::GenerationApi;
use crate::client::error::ClientError;
use crate::client::ticker::{phrase_at, PhraseTicker, PHRASE_INTERVAL, STATUS_PHRASES};
use crate::models::catalog::FieldSchema;
use crate::models::content::derive_title;
use crate::models::ContentRequest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Shown when the relay answered without text
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "⚠️ La respuesta del backend no incluyó contenido.";

/// User selections and brief
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    pub content_type: String,
    pub tone: String,
    pub subtone: Option<String>,
    pub audience: String,
    pub brief: String,
}

impl FormDraft {
    /// Draft with the schema's first value of every enumeration
    pub fn from_schema(schema: &FieldSchema) -> Self {
        let (content_type, tone, audience) = schema.defaults().unwrap_or(("", "", ""));
        Self {
            content_type: content_type.to_string(),
            tone: tone.to_string(),
            subtone: None,
            audience: audience.to_string(),
            brief: String::new(),
        }
    }

    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            ..self
        }
    }

    /// Changing the tone clears the sub-tone
    pub fn with_tone(self, tone: impl Into<String>) -> Self {
        Self {
            tone: tone.into(),
            subtone: None,
            ..self
        }
    }

    pub fn with_subtone(self, subtone: impl Into<String>) -> Self {
        Self {
            subtone: Some(subtone.into()),
            ..self
        }
    }

    pub fn with_audience(self, audience: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            ..self
        }
    }

    pub fn with_brief(self, brief: impl Into<String>) -> Self {
        Self {
            brief: brief.into(),
            ..self
        }
    }

    /// Title derived from the content type
    pub fn title(&self) -> String {
        derive_title(&self.content_type)
    }

    pub fn has_brief(&self) -> bool {
        !self.brief.trim().is_empty()
    }
}

/// Reasons a draft cannot be submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("El contenido solicitado no puede estar vacío")]
    EmptyBrief,
    #[error("Tipo de contenido desconocido: {0}")]
    UnknownContentType(String),
    #[error("Tono desconocido: {0}")]
    UnknownTone(String),
    #[error("El subtono '{subtone}' no corresponde al tono '{tone}'")]
    SubtoneNotInTone { tone: String, subtone: String },
    #[error("Audiencia desconocida: {0}")]
    UnknownAudience(String),
}

/// Validate a draft against a schema and build the request it submits
pub fn validate(draft: &FormDraft, schema: &FieldSchema) -> Result<ContentRequest, ValidationError> {
    if !draft.has_brief() {
        return Err(ValidationError::EmptyBrief);
    }

    if schema.content_type(&draft.content_type).is_none() {
        return Err(ValidationError::UnknownContentType(draft.content_type.clone()));
    }

    let tone = schema
        .tone(&draft.tone)
        .ok_or_else(|| ValidationError::UnknownTone(draft.tone.clone()))?;

    let subtone = draft.subtone.clone().filter(|s| !s.is_empty());
    if let Some(subtone) = &subtone {
        if !tone.accepts_subtone(subtone) {
            return Err(ValidationError::SubtoneNotInTone {
                tone: draft.tone.clone(),
                subtone: subtone.clone(),
            });
        }
    }

    if schema.audience(&draft.audience).is_none() {
        return Err(ValidationError::UnknownAudience(draft.audience.clone()));
    }

    Ok(ContentRequest {
        title: draft.title(),
        body: draft.brief.clone(),
        tone: draft.tone.clone(),
        subtone,
        audience: draft.audience.clone(),
    })
}

/// Message emitted by the form for the page that hosts it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Generated { title: String, content: String },
}

/// What the form shows; exactly one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Idle,
    Loading { phrase: &'static str },
    Error(String),
    Result(String),
}

/// Outcome of one call to `submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request is already in flight; nothing was sent
    Busy,
    /// The draft is not submittable; nothing was sent
    Rejected(ValidationError),
    /// The relay answered; carries the displayed text
    Completed(String),
    /// The call failed; carries the error
    Failed(ClientError),
}

enum Phase {
    Idle,
    Loading {
        // Dropped with the phase, which aborts the ticker task
        _ticker: PhraseTicker,
        ticks: Arc<AtomicUsize>,
    },
    Failed(String),
    Done(String),
}

struct FormState {
    draft: FormDraft,
    phase: Phase,
}

/// Stateful generation form
pub struct GenerationForm {
    api: Arc<dyn GenerationApi>,
    schema: FieldSchema,
    state: Mutex<FormState>,
    events: Option<mpsc::UnboundedSender<FormEvent>>,
    phrases: &'static [&'static str],
    phrase_interval: Duration,
}

impl GenerationForm {
    /// Form driven by the standard press office schema
    pub fn new(api: Arc<dyn GenerationApi>) -> Self {
        Self::build(api, FieldSchema::standard().clone())
    }

    /// Form driven by a custom schema, rejected when it cannot seed a draft
    pub fn with_schema(
        api: Arc<dyn GenerationApi>,
        schema: FieldSchema,
    ) -> Result<Self, ClientError> {
        schema.validate().map_err(ClientError::Validation)?;
        Ok(Self::build(api, schema))
    }

    fn build(api: Arc<dyn GenerationApi>, schema: FieldSchema) -> Self {
        let draft = FormDraft::from_schema(&schema);
        Self {
            api,
            schema,
            state: Mutex::new(FormState {
                draft,
                phase: Phase::Idle,
            }),
            events: None,
            phrases: &STATUS_PHRASES,
            phrase_interval: PHRASE_INTERVAL,
        }
    }

    pub fn with_phrase_interval(mut self, interval: Duration) -> Self {
        self.phrase_interval = interval;
        self
    }

    /// Receive the form's events; replaces any previous subscriber
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<FormEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        // A panic while holding the lock leaves plain data behind; keep going
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current draft
    pub fn draft(&self) -> FormDraft {
        self.lock().draft.clone()
    }

    /// Replace the draft with an edited copy
    pub fn edit<F>(&self, edit: F)
    where
        F: FnOnce(FormDraft) -> FormDraft,
    {
        let mut state = self.lock();
        let draft = state.draft.clone();
        state.draft = edit(draft);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lock().phase, Phase::Loading { .. })
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        let state = self.lock();
        !matches!(state.phase, Phase::Loading { .. }) && state.draft.has_brief()
    }

    /// Projection of the current phase
    pub fn view(&self) -> FormView {
        match &self.lock().phase {
            Phase::Idle => FormView::Idle,
            Phase::Loading { ticks, .. } => FormView::Loading {
                phrase: phrase_at(self.phrases, ticks.load(Ordering::Relaxed)).unwrap_or(""),
            },
            Phase::Failed(message) => FormView::Error(message.clone()),
            Phase::Done(text) => FormView::Result(text.clone()),
        }
    }

    /// Submit the current draft
    ///
    /// Issues at most one relay call. Refused while another submission is
    /// in flight and when the draft does not validate.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.lock();

            if matches!(state.phase, Phase::Loading { .. }) {
                debug!("Submission ignored: a request is already in flight");
                return SubmitOutcome::Busy;
            }

            let request = match validate(&state.draft, &self.schema) {
                Ok(request) => request,
                Err(e) => {
                    debug!("Submission refused: {}", e);
                    return SubmitOutcome::Rejected(e);
                }
            };

            let ticks = Arc::new(AtomicUsize::new(0));
            let counter = ticks.clone();
            let ticker = PhraseTicker::start(self.phrase_interval, move |n| {
                counter.store(n, Ordering::Relaxed);
            });
            state.phase = Phase::Loading {
                _ticker: ticker,
                ticks,
            };

            request
        };

        // Leaves the loading phase even if this future is dropped mid-call
        let _reset = LoadingReset { form: self };

        let outcome = self.api.generate(&request).await;

        let (phase, event, result) = match outcome {
            Ok(response) => match response.resultado.filter(|text| !text.is_empty()) {
                Some(text) => (
                    Phase::Done(text.clone()),
                    Some(FormEvent::Generated {
                        title: request.title.clone(),
                        content: text.clone(),
                    }),
                    SubmitOutcome::Completed(text),
                ),
                None => (
                    Phase::Done(EMPTY_RESPONSE_PLACEHOLDER.to_string()),
                    None,
                    SubmitOutcome::Completed(EMPTY_RESPONSE_PLACEHOLDER.to_string()),
                ),
            },
            Err(e) => {
                warn!("Generation failed: {}", e);
                (Phase::Failed(e.user_message()), None, SubmitOutcome::Failed(e))
            }
        };

        self.lock().phase = phase;

        if let (Some(event), Some(events)) = (event, &self.events) {
            if events.send(event).is_err() {
                debug!("Form event dropped: no subscriber");
            }
        }

        result
    }
}

/// Resets a form still in the loading phase when dropped
struct LoadingReset<'a> {
    form: &'a GenerationForm,
}

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        let mut state = self.form.lock();
        if matches!(state.phase, Phase::Loading { .. }) {
            state.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FormDraft {
        FormDraft::from_schema(FieldSchema::standard())
    }

    #[test]
    fn test_whitespace_brief_rejected() {
        let schema = FieldSchema::standard();
        assert_eq!(validate(&draft(), schema), Err(ValidationError::EmptyBrief));
        assert_eq!(
            validate(&draft().with_brief(" \n\t "), schema),
            Err(ValidationError::EmptyBrief)
        );
    }

    #[test]
    fn test_tone_change_clears_subtone() {
        let draft = draft().with_subtone("profesional").with_tone("cordial");
        assert_eq!(draft.subtone, None);
    }

    #[test]
    fn test_subtone_must_belong_to_tone() {
        let schema = FieldSchema::standard();
        let draft = draft()
            .with_brief("Anuncio")
            .with_tone("cordial")
            .with_subtone("profesional");
        assert!(matches!(
            validate(&draft, schema),
            Err(ValidationError::SubtoneNotInTone { .. })
        ));

        let draft = draft.with_tone("cordial").with_subtone("cercano");
        let request = validate(&draft, schema).unwrap();
        assert_eq!(request.subtone.as_deref(), Some("cercano"));
    }

    #[test]
    fn test_validated_request_fields() {
        let draft = draft()
            .with_content_type("boletin")
            .with_audience("interna")
            .with_brief("Nuevo horario de atención");
        let request = validate(&draft, FieldSchema::standard()).unwrap();

        assert_eq!(request.title, "Redacción de boletin");
        assert_eq!(request.tone, "institucional");
        assert_eq!(request.audience, "interna");
        assert_eq!(request.body, "Nuevo horario de atención");
    }
}
