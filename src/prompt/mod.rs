mod builder;
mod engine;

pub use builder::{InstructionKind, PromptEngine, conversation_prompt};
pub use engine::TeraEngine;
