// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Fallback layer ──────────────────────────────────────────────────────────
pub mod fallback;

// ── Backend implementations ─────────────────────────────────────────────────
pub mod gemini;

pub use fallback::ModelFallback;
pub use gemini::GeminiBackend;
pub use http_client::build_backend_client;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{BackendFuture, GenerativeBackend};
pub use types::{Generation, PromptPart};
