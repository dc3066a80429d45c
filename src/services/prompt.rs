//! System instruction construction
//!
//! Turns a content request into the two-message prompt sent upstream

use crate::models::completion::ChatMessage;
use crate::models::ContentRequest;

/// Build the press-writer system instruction for a request
///
/// Tone and audience always appear; sub-tone and title are folded in when
/// present.
pub fn build_system_instruction(request: &ContentRequest) -> String {
    let mut instruction = String::from(
        "Eres un redactor oficial del departamento de prensa de un organismo estatal.\n",
    );

    instruction.push_str(&format!(
        "Redacta el contenido solicitado con tono {}, dirigido al {}.\n",
        request.tone.trim(),
        request.audience.trim()
    ));

    if let Some(subtone) = request.subtone.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        instruction.push_str(&format!("Matiz del tono: {}.\n", subtone));
    }

    if !request.title.trim().is_empty() {
        instruction.push_str(&format!("Pieza a redactar: {}.\n", request.title.trim()));
    }

    instruction.push_str(
        "Asegúrate de que el mensaje sea claro, institucional, empático y socialmente responsable.",
    );

    instruction
}

/// System instruction followed by the user's brief
pub fn build_messages(request: &ContentRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(build_system_instruction(request)),
        ChatMessage::user(request.body.clone()),
    ]
}
