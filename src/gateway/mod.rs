//! Axum HTTP surface: chat, upload, persona listing and health.
//!
//! Every route shares one [`AppState`] built at startup. Bodies are capped
//! by `RequestBodyLimitLayer` (axum's own 2 MB extractor cap is disabled so
//! the configured limit is the only one) and whole requests by
//! `TimeoutLayer`.

mod handlers;
mod server;

pub use server::{AppState, build_app, run_gateway, run_gateway_with_listener};
