use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the hosted inference endpoint.
    pub hf_api_token: String,
    pub hf_api_base: String,
    pub summarizer_model: String,
    /// Ask the inference endpoint to block while a cold model warms up.
    pub summarizer_wait_for_model: bool,
    /// Optional path to a local `tokenizer.json` used for token-level input
    /// truncation. Without it the summarizer falls back to a word budget.
    pub summarizer_tokenizer_path: Option<PathBuf>,
    /// TTF used to rasterize the word cloud.
    pub wordcloud_font_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            hf_api_token: require_env("HF_API_TOKEN")?,
            hf_api_base: std::env::var("HF_API_BASE")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
            summarizer_model: std::env::var("SUMMARIZER_MODEL")
                .unwrap_or_else(|_| "facebook/bart-large-cnn".to_string()),
            summarizer_wait_for_model: std::env::var("SUMMARIZER_WAIT_FOR_MODEL")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            summarizer_tokenizer_path: std::env::var("SUMMARIZER_TOKENIZER_PATH")
                .ok()
                .map(PathBuf::from),
            wordcloud_font_path: std::env::var("WORDCLOUD_FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")
                }),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
