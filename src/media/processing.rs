use super::detection::{
    ARCHIVE_TYPES, SPREADSHEET_TYPES, WORD_TYPES, effective_mime, has_extension, is_text_file_name,
    is_text_mime, looks_binary,
};
use super::pdf::extract_pdf;
use super::types::{FileCategory, UploadedFile};
use crate::error::FileProcessingError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
const WORD_EXTENSIONS: &[&str] = &["doc", "docx"];
const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "csv"];

/// Turns raw upload bytes into an [`UploadedFile`].
///
/// Rules are checked in a fixed order and the first match wins; see
/// [`FileNormalizer::classify`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FileNormalizer;

impl FileNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify and convert one file.
    ///
    /// Order: image, PDF, known text, Word, spreadsheet/CSV, audio, video,
    /// archive, then the binary heuristic.
    pub fn classify(
        &self,
        bytes: &[u8],
        declared_mime: &str,
        file_name: &str,
    ) -> Result<UploadedFile, FileProcessingError> {
        let mime = effective_mime(bytes, declared_mime);
        let mime_str = mime.as_deref().unwrap_or_default();
        let file_size = bytes.len() as u64;
        let file_type = mime.clone().unwrap_or_else(|| "unknown".to_string());

        let upload = |category: FileCategory, data: String| UploadedFile {
            category,
            data,
            file_name: file_name.to_string(),
            file_type: file_type.clone(),
            file_size,
            pages: None,
            info: None,
        };

        let uploaded = if mime_str.starts_with("image/") {
            upload(
                FileCategory::Image,
                format!("data:{mime_str};base64,{}", STANDARD.encode(bytes)),
            )
        } else if mime_str == "application/pdf" {
            let content = extract_pdf(bytes)?;
            UploadedFile {
                pages: Some(content.pages),
                info: Some(content.info),
                ..upload(FileCategory::Pdf, content.text)
            }
        } else if is_text_mime(mime_str) || is_text_file_name(file_name) {
            upload(
                FileCategory::Text,
                String::from_utf8_lossy(bytes).into_owned(),
            )
        } else if WORD_TYPES.contains(&mime_str) || has_extension(file_name, WORD_EXTENSIONS) {
            upload(
                FileCategory::Document,
                format!(
                    "This is a Microsoft Word document: {file_name}. The assistant can see the \
                     file but cannot read its content directly. Upload it as PDF or text for \
                     full analysis."
                ),
            )
        } else if SPREADSHEET_TYPES.contains(&mime_str)
            || has_extension(file_name, SPREADSHEET_EXTENSIONS)
        {
            if has_extension(file_name, &["csv"]) {
                upload(
                    FileCategory::Csv,
                    String::from_utf8_lossy(bytes).into_owned(),
                )
            } else {
                upload(
                    FileCategory::Spreadsheet,
                    format!(
                        "This is a spreadsheet file: {file_name}. The assistant can see the \
                         file but cannot read Excel files directly. Convert it to CSV for full \
                         analysis."
                    ),
                )
            }
        } else if mime_str.starts_with("audio/") || has_extension(file_name, AUDIO_EXTENSIONS) {
            upload(
                FileCategory::Audio,
                format!(
                    "This is an audio file: {file_name} ({} MB). The assistant can see it is \
                     an audio file but cannot listen to it.",
                    megabytes(file_size)
                ),
            )
        } else if mime_str.starts_with("video/") || has_extension(file_name, VIDEO_EXTENSIONS) {
            upload(
                FileCategory::Video,
                format!(
                    "This is a video file: {file_name} ({} MB). The assistant can see it is a \
                     video but cannot watch it.",
                    megabytes(file_size)
                ),
            )
        } else if ARCHIVE_TYPES.contains(&mime_str)
            || has_extension(file_name, ARCHIVE_EXTENSIONS)
        {
            upload(
                FileCategory::Archive,
                format!(
                    "This is an archive file: {file_name} ({} MB). Extract it and upload the \
                     individual files for analysis.",
                    megabytes(file_size)
                ),
            )
        } else {
            match Self::decode_unknown(bytes) {
                Some(text) => upload(FileCategory::Text, text),
                None => upload(
                    FileCategory::Binary,
                    format!(
                        "This is a binary file: {file_name} ({}, {} MB). Upload a text, PDF \
                         or image file for analysis.",
                        mime.as_deref().unwrap_or("unknown type"),
                        megabytes(file_size)
                    ),
                ),
            }
        };

        tracing::debug!(
            category = %uploaded.category,
            file_type = uploaded.file_type.as_str(),
            size = file_size,
            "Classified upload"
        );
        Ok(uploaded)
    }

    /// Classify on the blocking pool. PDF extraction can take a while and
    /// may panic on hostile input; a panic surfaces as
    /// [`FileProcessingError::Aborted`].
    pub async fn classify_blocking(
        &self,
        bytes: Vec<u8>,
        declared_mime: String,
        file_name: String,
    ) -> Result<UploadedFile, FileProcessingError> {
        let normalizer = *self;
        tokio::task::spawn_blocking(move || {
            normalizer.classify(&bytes, &declared_mime, &file_name)
        })
        .await
        .map_err(|e| FileProcessingError::Aborted(e.to_string()))?
    }

    /// Fallback for unrecognized types: text only when the head does not
    /// look binary and the whole file is valid UTF-8.
    fn decode_unknown(bytes: &[u8]) -> Option<String> {
        if looks_binary(bytes) {
            return None;
        }
        String::from_utf8(bytes.to_vec()).ok()
    }
}

fn megabytes(size: u64) -> String {
    format!("{:.2}", size as f64 / 1024.0 / 1024.0)
}
