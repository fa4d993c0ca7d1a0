//! Abstractive summarization behind a pluggable backend trait.
//!
//! ARCHITECTURAL RULE: no other module talks to the inference endpoint
//! directly. All summarization goes through a `Summarizer`, carried in
//! `AppState` as `Arc<dyn Summarizer>` so backends can be swapped without
//! touching handler or runner code.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod remote;
pub mod truncate;

pub use remote::RemoteSummarizer;
pub use truncate::TokenBudget;

/// Token budget for summarizer input. Text beyond this is truncated before
/// the request is built.
pub const MAX_INPUT_TOKENS: usize = 1024;

/// Task prefix prepended to the input text before summarization.
pub const TASK_PREFIX: &str = "summarize: ";

/// Beam-search decoding parameters sent with every summarization request.
/// The summary length bounds (50-150 tokens) are soft, enforced by the
/// decoder rather than post-hoc.
#[derive(Debug, Clone, Serialize)]
pub struct DecodingParams {
    pub max_length: u32,
    pub min_length: u32,
    pub length_penalty: f32,
    pub num_beams: u32,
    pub early_stopping: bool,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 50,
            length_penalty: 2.0,
            num_beams: 4,
            early_stopping: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Service unavailable after {retries} retries")]
    Exhausted { retries: u32 },

    #[error("Summarizer returned empty content")]
    EmptyContent,
}

/// The summarization seam. The production backend delegates to a hosted
/// inference endpoint; tests substitute doubles.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decoding_params() {
        let params = DecodingParams::default();
        assert_eq!(params.max_length, 150);
        assert_eq!(params.min_length, 50);
        assert!((params.length_penalty - 2.0).abs() < f32::EPSILON);
        assert_eq!(params.num_beams, 4);
        assert!(params.early_stopping);
    }

    #[test]
    fn test_decoding_params_serialize_shape() {
        let json = serde_json::to_value(DecodingParams::default()).unwrap();
        assert_eq!(json["max_length"], 150);
        assert_eq!(json["min_length"], 50);
        assert_eq!(json["num_beams"], 4);
        assert_eq!(json["early_stopping"], true);
    }
}
