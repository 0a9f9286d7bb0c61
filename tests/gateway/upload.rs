use super::{GatewayTestServer, ScriptedBackend, persona};
use bijochat::config::GatewayConfig;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

fn file_part(bytes: Vec<u8>, file_name: &str, mime: &str) -> Part {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("test mime should parse")
}

async fn upload(server: &GatewayTestServer, form: Form) -> (StatusCode, Value) {
    let response = server
        .client
        .post(server.url("/api/upload-file"))
        .multipart(form)
        .send()
        .await
        .expect("upload request should complete");
    let status = response.status();
    let body = response.json().await.expect("upload response should be json");
    (status, body)
}

fn one_page_pdf(body: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 18.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(body)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[tokio::test]
async fn text_upload_round_trips_content() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let form = Form::new().part(
        "file",
        file_part(b"fn main() {}\n".to_vec(), "main.rs", "text/x-rust"),
    );
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "text");
    assert_eq!(body["data"], "fn main() {}\n");
    assert_eq!(body["fileName"], "main.rs");
    assert_eq!(body["fileType"], "text/x-rust");
    assert_eq!(body["fileSize"], 13);
    assert!(body.get("pages").is_none());
}

#[tokio::test]
async fn csv_upload_is_classified_by_extension() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let form = Form::new().part(
        "file",
        file_part(
            b"name,score\nada,3\n".to_vec(),
            "scores.csv",
            "application/vnd.ms-excel",
        ),
    );
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "csv");
    assert_eq!(body["data"], "name,score\nada,3\n");
}

#[tokio::test]
async fn pdf_upload_extracts_text_and_page_count() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let form = Form::new().part(
        "file",
        file_part(one_page_pdf("Invoice 42"), "invoice.pdf", "application/pdf"),
    );
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "pdf");
    assert_eq!(body["pages"], 1);
    assert!(body["data"].as_str().unwrap().contains("Invoice 42"));
    assert_eq!(body["info"]["PDFFormatVersion"], "1.4");
}

#[tokio::test]
async fn binary_upload_gets_placeholder() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let mut bytes = vec![0u8; 600];
    bytes.extend(std::iter::repeat_n(b'a', 424));
    let form = Form::new().part(
        "file",
        file_part(bytes, "blob.bin", "application/octet-stream"),
    );
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "binary");
    assert_eq!(body["fileSize"], 1024);
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let form = Form::new().text("mode", "bijo");
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn broken_pdf_reports_persona_upload_error() {
    let server = GatewayTestServer::start(ScriptedBackend::answering()).await;
    let form = Form::new().text("mode", "ajai").part(
        "file",
        file_part(b"%PDF-1.7 truncated".to_vec(), "broken.pdf", "application/pdf"),
    );
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], persona("ajai").upload_error_message.as_str());
}

/// PNG signature followed by filler, `len` bytes in total.
fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len, 0x42);
    bytes
}

fn small_limits() -> GatewayConfig {
    GatewayConfig {
        max_body_bytes: 8 * 1024,
        ..GatewayConfig::default()
    }
}

#[tokio::test]
async fn oversized_upload_is_refused_with_json_error() {
    let server = GatewayTestServer::start_with(ScriptedBackend::answering(), small_limits()).await;
    let form = Form::new().part(
        "file",
        file_part(vec![b'x'; 16 * 1024], "big.txt", "text/plain"),
    );
    let (status, body) = upload(&server, form).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], persona("normal").upload_error_message.as_str());
}

#[tokio::test]
async fn uploaded_image_near_the_limit_can_be_sent_to_chat() {
    let server = GatewayTestServer::start_with(ScriptedBackend::answering(), small_limits()).await;
    let form = Form::new().part("file", file_part(png_bytes(7 * 1024), "shot.png", "image/png"));
    let (status, uploaded) = upload(&server, form).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(uploaded["type"], "image");
    let data_url = uploaded["data"].as_str().unwrap().to_string();
    assert!(data_url.len() > 8 * 1024);

    let response = server
        .client
        .post(server.url("/api/chat"))
        .json(&serde_json::json!({
            "messages": [{ "role": "user", "content": "what is this?", "image": data_url }]
        }))
        .send()
        .await
        .expect("chat request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["content"], "reply from flash-lite");
}

#[tokio::test]
async fn oversized_chat_body_is_refused_with_json_error() {
    let gateway = GatewayConfig {
        max_body_bytes: 1024,
        ..GatewayConfig::default()
    };
    let server = GatewayTestServer::start_with(ScriptedBackend::answering(), gateway).await;
    let response = server
        .client
        .post(server.url("/api/chat"))
        .json(&serde_json::json!({
            "messages": [{ "role": "user", "content": "x".repeat(8 * 1024) }]
        }))
        .send()
        .await
        .expect("chat request should complete");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.expect("rejection should be json");
    assert_eq!(body["error"], persona("normal").error_message.as_str());
    assert!(server.backend.calls().is_empty());
}

#[tokio::test]
async fn timed_out_chat_answers_json_error() {
    let gateway = GatewayConfig {
        request_timeout_secs: 1,
        ..GatewayConfig::default()
    };
    let backend = ScriptedBackend::answering().stall(Duration::from_secs(5));
    let server = GatewayTestServer::start_with(backend, gateway).await;
    let response = server
        .client
        .post(server.url("/api/chat"))
        .json(&serde_json::json!({ "messages": [{ "role": "user", "content": "hi" }] }))
        .send()
        .await
        .expect("chat request should complete");

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let body: Value = response.json().await.expect("timeout should be json");
    assert_eq!(body["error"], persona("normal").error_message.as_str());
}
