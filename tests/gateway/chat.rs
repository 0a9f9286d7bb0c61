use super::{GatewayTestServer, ScriptedBackend, persona};
use bijochat::llm::PromptPart;
use reqwest::StatusCode;
use serde_json::{Value, json};

const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

async fn post_chat(server: &GatewayTestServer, body: &Value) -> (StatusCode, Value) {
    let response = server
        .client
        .post(server.url("/api/chat"))
        .json(body)
        .send()
        .await
        .expect("chat request should complete");
    let status = response.status();
    let body = response.json().await.expect("chat response should be json");
    (status, body)
}

#[tokio::test]
async fn health_reports_candidates_in_order() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let body: Value = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["models"], json!(["flash-lite", "flash", "pro"]));
}

#[tokio::test]
async fn personas_endpoint_lists_builtin_modes() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let body: Value = server
        .client
        .get(server.url("/api/personas"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["normal", "bijo", "ajai"]);
}

#[tokio::test]
async fn plain_conversation_uses_first_candidate_only() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, body) = post_chat(
        &server,
        &json!({ "messages": [{ "role": "user", "content": "Hello there" }], "mode": "ajai" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "reply from flash-lite");
    assert!(body["image"].is_null());

    let calls = server.backend.calls();
    assert_eq!(calls.len(), 1);
    let expected = format!("{}\n\nUser: hello there", persona("ajai").system_prompt);
    assert_eq!(calls[0].1, vec![PromptPart::text(expected)]);
}

#[tokio::test]
async fn only_the_latest_turn_is_forwarded() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, _) = post_chat(
        &server,
        &json!({
            "messages": [
                { "role": "user", "content": "first question" },
                { "role": "assistant", "content": "first answer" },
                { "role": "user", "content": "second question" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let calls = server.backend.calls();
    let prompt = calls[0].1[0].as_text().unwrap().to_string();
    assert!(prompt.ends_with("User: second question"));
    assert!(!prompt.contains("first question"));
}

#[tokio::test]
async fn rate_limited_candidates_fall_through_to_next() {
    let backend = ScriptedBackend::answering()
        .rate_limit("flash-lite")
        .rate_limit("flash");
    let server = GatewayTestServer::start(backend).await;
    let (status, body) = post_chat(
        &server,
        &json!({ "messages": [{ "role": "user", "content": "hi" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "reply from pro");
    assert_eq!(
        server.backend.called_models(),
        vec!["flash-lite", "flash", "pro"]
    );
}

#[tokio::test]
async fn fatal_error_stops_the_fallback_loop() {
    let server = GatewayTestServer::start(ScriptedBackend::answering().fail("flash-lite")).await;
    let (status, body) = post_chat(
        &server,
        &json!({ "messages": [{ "role": "user", "content": "hi" }], "mode": "bijo" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], persona("bijo").error_message.as_str());
    assert_eq!(server.backend.called_models(), vec!["flash-lite"]);
}

#[tokio::test]
async fn exhausted_candidates_answer_503_in_persona_voice() {
    let backend = ScriptedBackend::answering()
        .rate_limit("flash-lite")
        .rate_limit("flash")
        .rate_limit("pro");
    let server = GatewayTestServer::start(backend).await;
    let (status, body) = post_chat(
        &server,
        &json!({ "messages": [{ "role": "user", "content": "hi" }], "mode": "AJAI" }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], persona("ajai").exhausted_message.as_str());
    assert_eq!(server.backend.calls().len(), 3);
}

#[tokio::test]
async fn image_generation_request_appends_notice() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, body) = post_chat(
        &server,
        &json!({
            "messages": [{ "role": "user", "content": "Generate an image of a cat" }],
            "mode": "bijo"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["image"].is_null());
    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with("reply from flash-lite"));
    assert!(content.ends_with(persona("bijo").image_generation_notice.as_str()));
}

#[tokio::test]
async fn image_analysis_sends_inline_data() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, _) = post_chat(
        &server,
        &json!({
            "messages": [{ "role": "user", "content": "what is this?", "image": PNG_DATA_URL }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let parts = &server.backend.calls()[0].1;
    assert_eq!(parts.len(), 3);
    assert_eq!(
        parts[2],
        PromptPart::inline_data("image/png", "iVBORw0KGgo=")
    );
}

#[tokio::test]
async fn malformed_image_is_a_client_error() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, body) = post_chat(
        &server,
        &json!({
            "messages": [{ "role": "user", "content": "look", "image": "data:image/png,rawbytes" }],
            "mode": "bijo"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], persona("bijo").error_message.as_str());
    assert!(server.backend.calls().is_empty());
}

#[tokio::test]
async fn file_analysis_embeds_file_text() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, _) = post_chat(
        &server,
        &json!({
            "messages": [{ "role": "user", "content": "summarize this csv", "file": "a,b\n1,2" }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let parts = &server.backend.calls()[0].1;
    let instruction = parts.last().and_then(PromptPart::as_text).unwrap();
    assert!(instruction.contains("CSV file"));
    assert!(instruction.contains("a,b\n1,2"));
}

#[tokio::test]
async fn empty_conversation_is_rejected() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let (status, body) = post_chat(&server, &json!({ "messages": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], persona("normal").error_message.as_str());
}

#[tokio::test]
async fn non_json_body_uses_default_persona() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let response = server
        .client
        .post(server.url("/api/chat"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], persona("normal").error_message.as_str());
}
