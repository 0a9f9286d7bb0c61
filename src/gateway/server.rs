use super::handlers::{
    CHAT_PATH, UPLOAD_PATH, handle_chat, handle_health, handle_personas, handle_upload,
    json_rejections,
};

use crate::chat::ChatDispatcher;
use crate::config::{Config, GatewayConfig};
use crate::llm::{GeminiBackend, GenerativeBackend, ModelFallback};
use crate::media::FileNormalizer;
use crate::persona::PersonaSet;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ChatDispatcher>,
    pub normalizer: FileNormalizer,
}

impl AppState {
    pub fn new(dispatcher: Arc<ChatDispatcher>) -> Self {
        Self {
            dispatcher,
            normalizer: FileNormalizer::new(),
        }
    }

    /// Wire the Gemini backend, the candidate list and the built-in
    /// personas from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn GenerativeBackend> = Arc::new(
            GeminiBackend::from_config(&config.llm, config.api_key.as_deref())
                .context("build Gemini backend")?,
        );
        let fallback = ModelFallback::new(backend, config.llm.models.clone());
        let dispatcher = ChatDispatcher::new(fallback, Arc::new(PersonaSet::builtin()))
            .context("compile persona prompt templates")?;
        Ok(Self::new(Arc::new(dispatcher)))
    }
}

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Resolve a bind host that may be a name (`localhost`), a bare IPv6
/// literal (`::1`) or a bracketed one (`[::1]`).
async fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let bare = host
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(host);
    tokio::net::lookup_host((bare, port))
        .await
        .with_context(|| format!("resolve gateway bind address {host}:{port}"))?
        .next()
        .with_context(|| format!("no address found for gateway host {host}"))
}

/// Build state from config, bind, and serve until Ctrl-C.
pub async fn run_gateway(host: &str, port: u16, config: Config) -> Result<()> {
    if is_public_bind(host) {
        tracing::warn!(
            host,
            "Gateway is binding to a non-loopback address; the chat API has no authentication"
        );
    }

    let state = AppState::from_config(&config)?;
    state.dispatcher.fallback().warmup().await;

    let addr = resolve_bind_addr(host, port).await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(host, listener, state, &config.gateway).await
}

/// Serve on a pre-bound listener. Tests bind `127.0.0.1:0` and inject
/// their own state.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    state: AppState,
    gateway: &GatewayConfig,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    let display_addr = format!("{host}:{actual_port}");

    print_gateway_banner(&display_addr, &state);
    tracing::info!(addr = display_addr.as_str(), "Gateway listening");

    let app = build_app(state, gateway);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

fn print_gateway_banner(display_addr: &str, state: &AppState) {
    println!("Gateway listening on {display_addr}");
    println!("  POST /api/chat");
    println!("  POST /api/upload-file");
    println!("  GET  /api/personas");
    println!("  GET  /health");
    println!(
        "  Models: {}",
        state.dispatcher.models().join(" -> ")
    );
}

pub fn build_app(state: AppState, gateway: &GatewayConfig) -> Router {
    let upload_limit = gateway.max_body_bytes;
    let chat_limit = chat_body_limit(upload_limit);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route(
            CHAT_PATH,
            post(handle_chat).layer(RequestBodyLimitLayer::new(chat_limit)),
        )
        .route(
            UPLOAD_PATH,
            post(handle_upload).layer(RequestBodyLimitLayer::new(upload_limit)),
        )
        .route("/api/personas", get(handle_personas));

    let mut app = app
        .with_state(state.clone())
        .layer(DefaultBodyLimit::disable())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ))
        .layer(middleware::map_response_with_state(state, json_rejections));

    if let Some(cors) = cors_layer(&gateway.cors_origins) {
        app = app.layer(cors);
    }

    app
}

/// Body cap for `/api/chat`. An accepted upload comes back base64 encoded
/// (4 bytes per 3), and the turn carries message text and JSON framing on
/// top, budgeted at one more upload's worth.
fn chat_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(max_upload_bytes)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = origin.as_str(), "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        if parsed.is_empty() {
            return None;
        }
        AllowOrigin::list(parsed)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
