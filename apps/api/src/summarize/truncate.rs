//! Token-level input truncation.
//!
//! When a local `tokenizer.json` is configured, the budget is enforced in
//! model tokens. Without one, a whitespace-word budget approximates it and
//! the hosted endpoint truncates server-side as well.

use std::path::Path;

use tokenizers::Tokenizer;
use tracing::{info, warn};

pub struct TokenBudget {
    tokenizer: Option<Tokenizer>,
    max_tokens: usize,
}

impl TokenBudget {
    /// Loads the tokenizer from `path` when given; falls back to the word
    /// approximation when the path is absent or the file fails to load.
    pub fn from_tokenizer_path(path: Option<&Path>, max_tokens: usize) -> Self {
        let Some(p) = path else {
            return Self::words_only(max_tokens);
        };
        let tokenizer = match Tokenizer::from_file(p) {
            Ok(t) => {
                info!("Loaded summarizer tokenizer from {}", p.display());
                Some(t)
            }
            Err(e) => {
                warn!(
                    "Failed to load tokenizer from {} ({e}); using word-level truncation",
                    p.display()
                );
                None
            }
        };
        Self {
            tokenizer,
            max_tokens,
        }
    }

    /// A budget that always uses the word-level approximation.
    pub fn words_only(max_tokens: usize) -> Self {
        Self {
            tokenizer: None,
            max_tokens,
        }
    }

    /// Truncates `text` to the budget. Input already within the budget is
    /// returned unchanged (no encode/decode round trip).
    pub fn truncate(&self, text: &str) -> String {
        if let Some(tokenizer) = &self.tokenizer {
            match tokenizer.encode(text, false) {
                Ok(encoding) => {
                    let ids = encoding.get_ids();
                    if ids.len() <= self.max_tokens {
                        return text.to_string();
                    }
                    match tokenizer.decode(&ids[..self.max_tokens], true) {
                        Ok(decoded) => return decoded.trim().to_string(),
                        Err(e) => warn!("Tokenizer decode failed ({e}); falling back to words"),
                    }
                }
                Err(e) => warn!("Tokenizer encode failed ({e}); falling back to words"),
            }
        }
        self.truncate_words(text)
    }

    fn truncate_words(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= self.max_tokens {
            return text.to_string();
        }
        words[..self.max_tokens].join(" ")
    }
}
