use crate::error::ChatError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Decoded parts of a `data:<mime>;base64,<payload>` URL. The payload is
/// kept base64-encoded; it is forwarded to the backend as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

pub fn parse_data_url(url: &str) -> Result<InlineImage, ChatError> {
    let invalid = |reason: &str| ChatError::InvalidImage(reason.to_string());

    let url = url.trim();
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| invalid("not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing ',' separator"))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|param| param.trim().eq_ignore_ascii_case("base64")) {
        return Err(invalid("only base64 data URLs are supported"));
    }
    if mime_type.is_empty() || !mime_type.contains('/') {
        return Err(invalid("missing MIME type"));
    }
    if payload.is_empty() {
        return Err(invalid("empty payload"));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| invalid(&format!("payload is not valid base64: {e}")))?;

    Ok(InlineImage {
        mime_type,
        data: payload.to_string(),
    })
}
