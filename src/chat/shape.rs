use super::data_url::{InlineImage, parse_data_url};
use super::intent::IntentClassifier;
use super::types::ConversationMessage;
use crate::error::ChatError;

/// How the latest message is turned into a prompt. Checked in declaration
/// order; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestShape<'a> {
    ImageGeneration {
        message: &'a str,
    },
    ImageAnalysis {
        message: &'a str,
        image: InlineImage,
    },
    FileAnalysis {
        message: &'a str,
        file_label: &'static str,
        file_content: &'a str,
    },
    Conversation {
        message: &'a str,
    },
}

impl<'a> RequestShape<'a> {
    pub fn classify(
        message: &'a ConversationMessage,
        classifier: &dyn IntentClassifier,
    ) -> Result<Self, ChatError> {
        let text = message.content.as_str();

        if classifier.is_image_generation(text) {
            return Ok(Self::ImageGeneration { message: text });
        }
        if let Some(image) = message.image() {
            return Ok(Self::ImageAnalysis {
                message: text,
                image: parse_data_url(image)?,
            });
        }
        if let Some(file_content) = message.file() {
            return Ok(Self::FileAnalysis {
                message: text,
                file_label: file_label(text),
                file_content,
            });
        }
        Ok(Self::Conversation { message: text })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ImageGeneration { .. } => "image_generation",
            Self::ImageAnalysis { .. } => "image_analysis",
            Self::FileAnalysis { .. } => "file_analysis",
            Self::Conversation { .. } => "conversation",
        }
    }
}

const FILE_LABELS: &[(&str, &str)] = &[
    ("pdf", "PDF"),
    ("code", "code file"),
    ("csv", "CSV file"),
    ("text", "text file"),
    ("document", "document"),
];

/// Coarse description of an attachment, guessed from how the user talks
/// about it.
pub fn file_label(text: &str) -> &'static str {
    let text = text.to_lowercase();
    FILE_LABELS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map_or("file", |(_, label)| *label)
}
