use super::types::PromptPart;
use crate::error::BackendError;
use std::future::Future;
use std::pin::Pin;

pub type BackendFuture<'a> = Pin<Box<dyn Future<Output = Result<String, BackendError>> + Send + 'a>>;

/// A hosted generation API addressed by model id.
pub trait GenerativeBackend: Send + Sync {
    /// Backend identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Run one `generateContent` call against `model`.
    ///
    /// Implementations classify failures into [`BackendError::RateLimited`]
    /// or [`BackendError::Failed`] before returning.
    fn generate_content<'a>(&'a self, model: &'a str, parts: &'a [PromptPart])
    -> BackendFuture<'a>;

    /// Warm up the HTTP connection pool.
    fn warmup(&self) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        Box::pin(async move { Ok(()) })
    }
}
