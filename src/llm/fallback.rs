use super::traits::GenerativeBackend;
use super::types::{Generation, PromptPart};
use crate::error::DispatchError;
use std::sync::Arc;

/// Sequential retry-across-models loop.
///
/// Candidates are tried strictly in order, one call in flight at a time.
/// A rate-limited candidate hands over to the next one; any other failure
/// aborts the whole operation.
pub struct ModelFallback {
    backend: Arc<dyn GenerativeBackend>,
    candidates: Vec<String>,
}

impl ModelFallback {
    pub fn new(backend: Arc<dyn GenerativeBackend>, candidates: Vec<String>) -> Self {
        Self {
            backend,
            candidates,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub async fn warmup(&self) {
        tracing::info!(
            backend = self.backend.name(),
            "Warming up backend connection pool"
        );
        if let Err(e) = self.backend.warmup().await {
            tracing::warn!(backend = self.backend.name(), "Warmup failed (non-fatal): {e}");
        }
    }

    pub async fn generate(&self, parts: &[PromptPart]) -> Result<Generation, DispatchError> {
        let mut attempted = Vec::with_capacity(self.candidates.len());

        for (index, model) in self.candidates.iter().enumerate() {
            attempted.push(model.clone());

            match self.backend.generate_content(model, parts).await {
                Ok(text) => {
                    if index > 0 {
                        tracing::info!(
                            model = model.as_str(),
                            skipped = index,
                            "Fallback candidate answered"
                        );
                    }
                    return Ok(Generation {
                        text,
                        model: model.clone(),
                    });
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        model = model.as_str(),
                        "Candidate rate limited, switching to next model: {e}"
                    );
                }
                Err(e) => {
                    tracing::error!(model = model.as_str(), "Non-retryable backend error: {e}");
                    return Err(DispatchError::Fatal(e));
                }
            }
        }

        tracing::error!(
            attempts = attempted.len(),
            "All model candidates exhausted"
        );
        Err(DispatchError::AllModelsExhausted { attempted })
    }
}
