use super::intent::{IntentClassifier, KeywordIntentClassifier};
use super::shape::RequestShape;
use super::types::{ChatReply, ChatRequest};
use crate::error::ChatError;
use crate::llm::{ModelFallback, PromptPart};
use crate::persona::{PersonaSet, PersonalityProfile};
use crate::prompt::{PromptEngine, conversation_prompt};
use std::sync::Arc;

/// Turns one chat request into one model call.
///
/// Only the latest message is forwarded; earlier turns are accepted and
/// ignored. All state is fixed at construction and shared read-only.
pub struct ChatDispatcher {
    fallback: ModelFallback,
    personas: Arc<PersonaSet>,
    prompts: PromptEngine,
    classifier: Box<dyn IntentClassifier>,
}

impl ChatDispatcher {
    /// Compiles every persona template up front, so a broken template fails
    /// here and not on the first request that needs it.
    pub fn new(fallback: ModelFallback, personas: Arc<PersonaSet>) -> anyhow::Result<Self> {
        let prompts = PromptEngine::compile(&personas)?;
        Ok(Self {
            fallback,
            personas,
            prompts,
            classifier: Box::new(KeywordIntentClassifier::default()),
        })
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn personas(&self) -> &PersonaSet {
        &self.personas
    }

    pub fn models(&self) -> &[String] {
        self.fallback.candidates()
    }

    pub fn fallback(&self) -> &ModelFallback {
        &self.fallback
    }

    pub fn persona_for(&self, mode: Option<&str>) -> &PersonalityProfile {
        self.personas.select(mode)
    }

    pub async fn respond(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let persona = self.persona_for(request.mode.as_deref());
        let latest = request.latest().ok_or(ChatError::EmptyConversation)?;
        let shape = RequestShape::classify(latest, self.classifier.as_ref())?;

        tracing::info!(
            mode = persona.id.as_str(),
            shape = shape.name(),
            history = request.messages.len(),
            "Dispatching chat turn"
        );

        let parts = self.build_parts(persona, &shape)?;
        let generation = self.fallback.generate(&parts).await?;
        tracing::info!(
            mode = persona.id.as_str(),
            model = generation.model.as_str(),
            chars = generation.text.len(),
            "Chat turn answered"
        );

        let content = match shape {
            RequestShape::ImageGeneration { .. } => {
                format!("{}{}", generation.text, persona.image_generation_notice)
            }
            _ => generation.text,
        };
        Ok(ChatReply::text(content))
    }

    /// Prompt parts for one shape: the persona prompt first, then the
    /// rendered instruction, then any inline image.
    ///
    /// Image requests and plain conversation forward the message lowercased;
    /// the analysis shapes keep the user's casing.
    pub fn build_parts(
        &self,
        persona: &PersonalityProfile,
        shape: &RequestShape<'_>,
    ) -> Result<Vec<PromptPart>, ChatError> {
        let render_error = |e: anyhow::Error| ChatError::Prompt(format!("{e:#}"));

        let parts = match shape {
            RequestShape::ImageGeneration { message } => vec![
                PromptPart::text(&persona.system_prompt),
                PromptPart::text(
                    self.prompts
                        .image_request(persona, &message.to_lowercase())
                        .map_err(render_error)?,
                ),
            ],
            RequestShape::ImageAnalysis { message, image } => vec![
                PromptPart::text(&persona.system_prompt),
                PromptPart::text(
                    self.prompts
                        .image_analysis(persona, message)
                        .map_err(render_error)?,
                ),
                PromptPart::inline_data(&image.mime_type, &image.data),
            ],
            RequestShape::FileAnalysis {
                message,
                file_label,
                file_content,
            } => vec![
                PromptPart::text(&persona.system_prompt),
                PromptPart::text(
                    self.prompts
                        .file_analysis(persona, message, file_label, file_content)
                        .map_err(render_error)?,
                ),
            ],
            RequestShape::Conversation { message } => vec![PromptPart::text(
                conversation_prompt(&persona.system_prompt, &message.to_lowercase()),
            )],
        };
        Ok(parts)
    }
}

/// User-facing text for a failed chat turn, in the persona's voice.
pub fn failure_message<'p>(error: &ChatError, persona: &'p PersonalityProfile) -> &'p str {
    if error.is_exhausted() {
        &persona.exhausted_message
    } else {
        &persona.error_message
    }
}
