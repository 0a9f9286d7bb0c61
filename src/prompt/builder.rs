use super::engine::TeraEngine;
use crate::persona::{PersonaSet, PersonalityProfile};
use anyhow::Context as _;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use tera::Context;

/// The per-persona instruction templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum InstructionKind {
    ImageRequest,
    ImageAnalysis,
    FileAnalysis,
}

impl InstructionKind {
    fn source(self, persona: &PersonalityProfile) -> &str {
        match self {
            Self::ImageRequest => &persona.image_request_template,
            Self::ImageAnalysis => &persona.image_analysis_template,
            Self::FileAnalysis => &persona.file_analysis_template,
        }
    }
}

fn template_name(persona_id: &str, kind: InstructionKind) -> String {
    format!("{persona_id}/{kind}")
}

/// Persona instruction templates, compiled once at startup.
pub struct PromptEngine {
    engine: TeraEngine,
}

impl PromptEngine {
    /// Compile every instruction template of every persona. A syntax error
    /// in any template fails startup rather than the first request using it.
    pub fn compile(personas: &PersonaSet) -> anyhow::Result<Self> {
        let mut engine = TeraEngine::new();
        for persona in personas.iter() {
            for kind in InstructionKind::iter() {
                engine
                    .add_template(&template_name(&persona.id, kind), kind.source(persona))
                    .with_context(|| {
                        format!("Invalid {kind} template for persona '{}'", persona.id)
                    })?;
            }
        }
        tracing::debug!(personas = personas.len(), "Compiled persona prompt templates");
        Ok(Self { engine })
    }

    fn render(
        &self,
        persona: &PersonalityProfile,
        kind: InstructionKind,
        message: &str,
        file_type: &str,
        file_content: &str,
    ) -> anyhow::Result<String> {
        let name = template_name(&persona.id, kind);
        if !self.engine.has_template(&name) {
            anyhow::bail!("No {kind} template compiled for persona '{}'", persona.id);
        }

        let mut ctx = Context::new();
        ctx.insert("message", message);
        ctx.insert("file_type", file_type);
        ctx.insert("file_content", file_content);
        self.engine.render(&name, &ctx)
    }

    pub fn image_request(
        &self,
        persona: &PersonalityProfile,
        message: &str,
    ) -> anyhow::Result<String> {
        self.render(persona, InstructionKind::ImageRequest, message, "", "")
    }

    pub fn image_analysis(
        &self,
        persona: &PersonalityProfile,
        message: &str,
    ) -> anyhow::Result<String> {
        self.render(persona, InstructionKind::ImageAnalysis, message, "", "")
    }

    pub fn file_analysis(
        &self,
        persona: &PersonalityProfile,
        message: &str,
        file_type: &str,
        file_content: &str,
    ) -> anyhow::Result<String> {
        self.render(
            persona,
            InstructionKind::FileAnalysis,
            message,
            file_type,
            file_content,
        )
    }
}

/// Single-part prompt for a plain conversation turn.
pub fn conversation_prompt(system_prompt: &str, message: &str) -> String {
    format!("{system_prompt}\n\nUser: {message}")
}
