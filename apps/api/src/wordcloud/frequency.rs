//! Case-insensitive word counts with stopword filtering.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Words are alphabetic runs of length ≥ 2 (apostrophes allowed inside).
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z']+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Counts non-stopword words in `text`, case-insensitively, sorted by
/// descending count. Ties break alphabetically so layout is reproducible.
pub fn word_frequencies(text: &str) -> Vec<WordCount> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for m in WORD_RE.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if is_stopword(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut freqs: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    freqs.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    freqs
}

/// Common English stopwords, excluded from the visualization.
fn is_stopword(word: &str) -> bool {
    const STOPWORDS: &[&str] = &[
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
        "does", "did", "will", "would", "could", "should", "may", "might", "must", "can", "this",
        "that", "these", "those", "it", "its", "as", "if", "then", "than", "so", "such", "no",
        "not", "only", "own", "same", "too", "very", "just", "also", "now", "here", "there",
        "when", "where", "why", "how", "all", "each", "every", "both", "few", "more", "most",
        "other", "some", "any", "into", "through", "during", "before", "after", "above", "below",
        "up", "down", "out", "off", "over", "under", "again", "further", "once", "he", "she",
        "they", "we", "you", "i", "me", "my", "your", "his", "her", "their", "our", "which",
        "who", "whom", "what", "whose",
    ];
    STOPWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwords_excluded() {
        let freqs = word_frequencies("the engineer and the architect");
        let words: Vec<&str> = freqs.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["architect", "engineer"]);
    }

    #[test]
    fn test_counting_is_case_insensitive() {
        let freqs = word_frequencies("Rust rust RUST python");
        assert_eq!(freqs[0].word, "rust");
        assert_eq!(freqs[0].count, 3);
        assert_eq!(freqs[1].word, "python");
        assert_eq!(freqs[1].count, 1);
    }

    #[test]
    fn test_sorted_by_count_then_word() {
        let freqs = word_frequencies("beta alpha beta gamma alpha delta");
        assert_eq!(freqs[0].word, "alpha");
        assert_eq!(freqs[1].word, "beta");
        // gamma/delta tie at 1 → alphabetical
        assert_eq!(freqs[2].word, "delta");
        assert_eq!(freqs[3].word, "gamma");
    }

    #[test]
    fn test_single_letters_ignored() {
        let freqs = word_frequencies("x y z engineering");
        assert_eq!(freqs.len(), 1);
        assert_eq!(freqs[0].word, "engineering");
    }

    #[test]
    fn test_numbers_and_punctuation_ignored() {
        let freqs = word_frequencies("2019 -- 2023, led team; team grew 40%");
        let words: Vec<&str> = freqs.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["team", "grew", "led"]);
    }

    #[test]
    fn test_stopword_only_text_is_empty() {
        assert!(word_frequencies("the and of to").is_empty());
    }
}
