use super::AppState;
use crate::chat::{ChatRequest, failure_message};
use crate::error::{ChatError, FileProcessingError};
use crate::persona::PersonalityProfile;
use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Json, Response},
};
use tracing::Instrument;
use uuid::Uuid;

pub(super) const CHAT_PATH: &str = "/api/chat";
pub(super) const UPLOAD_PATH: &str = "/api/upload-file";

const NO_FILE_PROVIDED: &str = "No file provided";

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Rewrites the bare 413/408 answers of the body-limit and timeout layers
/// (and of axum's body extractors) into `{error}` JSON. The body was never
/// parsed, so the default persona speaks.
pub(super) async fn json_rejections(
    State(state): State<AppState>,
    uri: Uri,
    response: Response,
) -> Response {
    let status = response.status();
    if !matches!(
        status,
        StatusCode::PAYLOAD_TOO_LARGE | StatusCode::REQUEST_TIMEOUT
    ) || is_json(&response)
    {
        return response;
    }

    let persona = state.dispatcher.personas().default_profile();
    let message = if uri.path() == UPLOAD_PATH {
        &persona.upload_error_message
    } else {
        &persona.error_message
    };
    tracing::warn!(%status, path = uri.path(), "Request rejected before reaching its handler");
    error_response(status, message)
}

/// GET /health reports the candidate list, never secrets
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "models": state.dispatcher.models(),
    }))
}

/// GET /api/personas: `[{id, name}]` in registry order
pub(super) async fn handle_personas(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dispatcher.personas().summaries())
}

/// POST /api/chat
///
/// The body is read as raw bytes so that a schema mismatch can still be
/// answered in the voice of the requested persona.
pub(super) async fn handle_chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        let value: serde_json::Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                let persona = state.dispatcher.personas().default_profile();
                return chat_failure(&ChatError::InvalidBody(e.to_string()), persona);
            }
        };

        let mode = value
            .get("mode")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        let persona = state.dispatcher.persona_for(mode.as_deref());

        let request: ChatRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return chat_failure(&ChatError::InvalidBody(e.to_string()), persona),
        };

        match state.dispatcher.respond(&request).await {
            Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
            Err(e) => chat_failure(&e, persona),
        }
    }
    .instrument(span)
    .await
}

fn chat_failure(error: &ChatError, persona: &PersonalityProfile) -> Response {
    let status = error.status_code();
    if status.is_client_error() {
        tracing::warn!(mode = persona.id.as_str(), %status, "Chat request rejected: {error}");
    } else {
        tracing::error!(mode = persona.id.as_str(), %status, "Chat request failed: {error}");
    }
    error_response(status, failure_message(error, persona))
}

/// POST /api/upload-file: multipart `file` plus optional `mode`
pub(super) async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("upload", %request_id);

    async move {
        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(e) => {
                tracing::warn!("Upload is not multipart form data: {e}");
                return error_response(StatusCode::BAD_REQUEST, NO_FILE_PROVIDED);
            }
        };

        let mut mode: Option<String> = None;
        let mut upload: Option<(Vec<u8>, String, String)> = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    let status = e.status();
                    let persona = state.dispatcher.persona_for(mode.as_deref());
                    return upload_failure(
                        &FileProcessingError::Unreadable(e.body_text()),
                        persona,
                        status,
                    );
                }
            };

            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("file") => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    match field.bytes().await {
                        Ok(bytes) => upload = Some((bytes.to_vec(), content_type, file_name)),
                        Err(e) => {
                            let status = e.status();
                            let persona = state.dispatcher.persona_for(mode.as_deref());
                            return upload_failure(
                                &FileProcessingError::Unreadable(e.body_text()),
                                persona,
                                status,
                            );
                        }
                    }
                }
                Some("mode") => mode = field.text().await.ok(),
                _ => {}
            }
        }

        let persona = state.dispatcher.persona_for(mode.as_deref());
        let Some((bytes, content_type, file_name)) = upload else {
            tracing::warn!("Upload without a file field");
            return error_response(StatusCode::BAD_REQUEST, NO_FILE_PROVIDED);
        };

        tracing::info!(
            mode = persona.id.as_str(),
            file_name = file_name.as_str(),
            declared = content_type.as_str(),
            size = bytes.len(),
            "Processing upload"
        );

        match state
            .normalizer
            .classify_blocking(bytes, content_type, file_name)
            .await
        {
            Ok(uploaded) => {
                tracing::info!(category = %uploaded.category, "Upload normalized");
                (StatusCode::OK, Json(uploaded)).into_response()
            }
            Err(e) => upload_failure(&e, persona, StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
    .instrument(span)
    .await
}

fn upload_failure(
    error: &FileProcessingError,
    persona: &PersonalityProfile,
    status: StatusCode,
) -> Response {
    // Oversized bodies keep their 413; every other read failure is a 500.
    let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
        status
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    tracing::error!(mode = persona.id.as_str(), %status, "File processing failed: {error}");
    error_response(status, &persona.upload_error_message)
}
