//! PDF text extraction.
//!
//! Wraps `pdf-extract`: pages are concatenated in page order by the library,
//! then all whitespace runs are collapsed so downstream pattern matching sees
//! a single-spaced string.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extracts the full text of a PDF and normalizes its whitespace.
///
/// Invariant on success: the returned string never contains two consecutive
/// whitespace characters. Bytes that do not parse as a PDF surface as
/// `AppError::DocumentFormat`; the parser state is dropped on exit either way.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::DocumentFormat(e.to_string()))?;
    Ok(collapse_whitespace(&raw))
}

/// Collapses every whitespace run (spaces, newlines, tabs, form feeds from
/// page breaks) to a single space and trims the ends.
pub fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_runs() {
        let collapsed = collapse_whitespace("Jane  Doe\n\nSoftware\tEngineer\r\n");
        assert_eq!(collapsed, "Jane Doe Software Engineer");
    }

    #[test]
    fn test_collapse_no_consecutive_whitespace() {
        let collapsed = collapse_whitespace("a \n b\t\tc   d");
        assert!(
            !collapsed.contains("  ") && !collapsed.contains('\n') && !collapsed.contains('\t'),
            "found consecutive whitespace in {collapsed:?}"
        );
    }

    #[test]
    fn test_collapse_whitespace_empty_input() {
        assert_eq!(collapse_whitespace("   \n\t "), "");
    }

    #[test]
    fn test_collapse_whitespace_already_normalized() {
        assert_eq!(collapse_whitespace("one two three"), "one two three");
    }

    #[test]
    fn test_extract_text_rejects_garbage_bytes() {
        let err = extract_text(b"definitely not a pdf").unwrap_err();
        assert!(
            matches!(err, AppError::DocumentFormat(_)),
            "expected DocumentFormat, got {err:?}"
        );
    }

    #[test]
    fn test_extract_text_rejects_empty_input() {
        assert!(matches!(
            extract_text(b"").unwrap_err(),
            AppError::DocumentFormat(_)
        ));
    }
}
