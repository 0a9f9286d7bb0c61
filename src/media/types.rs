use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString};

/// Content category assigned to an upload. Serialized lowercase as the
/// `type` field of the upload response.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileCategory {
    Image,
    Pdf,
    Text,
    Csv,
    Document,
    Spreadsheet,
    Audio,
    Video,
    Archive,
    Binary,
}

impl FileCategory {
    /// Whether `data` carries the file's actual content rather than a
    /// placeholder description.
    #[must_use]
    pub fn carries_content(self) -> bool {
        matches!(self, Self::Image | Self::Pdf | Self::Text | Self::Csv)
    }
}

/// Normalized upload, in the shape the browser keeps until the next send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    #[serde(rename = "type")]
    pub category: FileCategory,
    /// Data URL for images, extracted text for text-like files, otherwise
    /// a static description.
    pub data: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_names_are_lowercase() {
        assert_eq!(FileCategory::Spreadsheet.to_string(), "spreadsheet");
        assert_eq!(FileCategory::from_str("pdf").unwrap(), FileCategory::Pdf);
        assert_eq!(
            serde_json::to_value(FileCategory::Csv).unwrap(),
            serde_json::json!("csv")
        );
    }

    #[test]
    fn uploaded_file_uses_browser_field_names() {
        let file = UploadedFile {
            category: FileCategory::Text,
            data: "hello".into(),
            file_name: "notes.txt".into(),
            file_type: "text/plain".into(),
            file_size: 5,
            pages: None,
            info: None,
        };
        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            serde_json::json!({
                "type": "text",
                "data": "hello",
                "fileName": "notes.txt",
                "fileType": "text/plain",
                "fileSize": 5
            })
        );
    }

    #[test]
    fn placeholder_categories_do_not_carry_content() {
        assert!(FileCategory::Pdf.carries_content());
        assert!(!FileCategory::Archive.carries_content());
        assert!(!FileCategory::Binary.carries_content());
    }
}
