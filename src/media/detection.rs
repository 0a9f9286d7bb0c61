pub const OCTET_STREAM: &str = "application/octet-stream";

/// Bytes inspected by the binary heuristic.
pub const BINARY_SAMPLE_LEN: usize = 1024;

/// Share of non-printable bytes above which a sample is treated as binary.
const BINARY_THRESHOLD: f64 = 0.3;

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "js", "ts", "tsx", "jsx", "py", "java", "cpp", "c", "h", "css", "html", "xml",
    "json", "yaml", "yml", "sql", "sh", "bat", "ps1", "php", "rb", "go", "rs", "swift", "kt",
    "scala", "r", "m", "dockerfile", "gitignore", "env", "config", "conf",
];

const TEXT_FILE_NAMES: &[&str] = &["dockerfile", "makefile", "readme"];

const TEXT_APPLICATION_TYPES: &[&str] = &[
    "application/json",
    "application/javascript",
    "application/xml",
];

pub const WORD_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

pub const SPREADSHEET_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

pub const ARCHIVE_TYPES: &[&str] = &[
    "application/zip",
    "application/x-rar-compressed",
    "application/x-7z-compressed",
];

#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

/// Reduce a client-declared content type to its lowercase essence
/// (`text/plain; charset=utf-8` becomes `text/plain`). Blank input yields
/// `None`.
#[must_use]
pub fn declared_essence(declared: &str) -> Option<String> {
    let declared = declared.trim();
    if declared.is_empty() {
        return None;
    }
    let essence = match declared.parse::<mime::Mime>() {
        Ok(parsed) => parsed.essence_str().to_ascii_lowercase(),
        Err(_) => declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
    };
    (!essence.is_empty()).then_some(essence)
}

/// The MIME type classification works from. Magic-byte sniffing only fills
/// in for a missing or generic declaration; it never overrides an explicit
/// one.
#[must_use]
pub fn effective_mime(data: &[u8], declared: &str) -> Option<String> {
    match declared_essence(declared) {
        Some(essence) if essence != OCTET_STREAM => Some(essence),
        declared => detect_mime(data).or(declared),
    }
}

/// Lowercase extension after the last dot, if any.
#[must_use]
pub fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

#[must_use]
pub fn has_extension(file_name: &str, candidates: &[&str]) -> bool {
    extension(file_name).is_some_and(|ext| candidates.contains(&ext.as_str()))
}

#[must_use]
pub fn is_text_mime(mime: &str) -> bool {
    mime.starts_with("text/") || TEXT_APPLICATION_TYPES.contains(&mime)
}

/// Known text or source file, judged by extension or by a conventional
/// extensionless name.
#[must_use]
pub fn is_text_file_name(file_name: &str) -> bool {
    let lowered = file_name.to_ascii_lowercase();
    TEXT_FILE_NAMES.contains(&lowered.as_str()) || has_extension(file_name, TEXT_EXTENSIONS)
}

/// Binary heuristic over the first [`BINARY_SAMPLE_LEN`] bytes: NUL and
/// control bytes other than TAB, LF and CR count as non-printable. An empty
/// sample is text.
#[must_use]
pub fn looks_binary(data: &[u8]) -> bool {
    let sample = &data[..data.len().min(BINARY_SAMPLE_LEN)];
    if sample.is_empty() {
        return false;
    }
    let non_printable = sample
        .iter()
        .filter(|&&byte| byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r'))
        .count();
    non_printable as f64 / sample.len() as f64 > BINARY_THRESHOLD
}
