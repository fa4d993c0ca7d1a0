//! Contact extraction over normalized resume text.
//!
//! Pure pattern heuristics: phone candidates are digit runs, link/email
//! candidates are whitespace-delimited tokens with a dotted alphabetic
//! suffix. Deterministic, no side effects, false positives accepted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ContactInfo;

/// Digit run of total length 10–14: leading digit, 8–12 interior digits or
/// hyphens, trailing digit, optional `+` prefix.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d-]{8,12}\d").unwrap());

/// `local@domain.tld`-shaped substring inside a candidate token.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S{2,}").unwrap());

/// Extracts phone, email, and link candidates from whitespace-normalized text.
///
/// A token is never classified as both email and link; email detection
/// takes precedence per token.
pub fn extract_contacts(text: &str) -> ContactInfo {
    let mut info = ContactInfo::default();

    for m in PHONE_RE.find_iter(text) {
        if has_phone_boundaries(text, m.start(), m.end()) {
            info.phone.push(m.as_str().to_string());
        }
    }

    for token in text.split_whitespace() {
        if !has_dotted_suffix(token) {
            continue;
        }
        if let Some(m) = EMAIL_RE.find(token) {
            // Keep only the address, dropping punctuation the token match
            // may have picked up around it.
            let address = m.as_str().trim_matches(|c: char| !c.is_ascii_alphanumeric());
            info.email.push(address.to_string());
        } else if token.starts_with("http") {
            info.links.push(token.to_string());
        } else {
            info.links.push(format!("https://{token}"));
        }
    }

    info
}

/// Word-boundary check for phone matches: the match must not sit inside a
/// longer digit/hyphen run, and `+` only counts at the very start of one.
fn has_phone_boundaries(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    if start > 0 {
        let prev = bytes[start - 1];
        if prev.is_ascii_alphanumeric() || prev == b'-' || prev == b'+' {
            return false;
        }
    }
    if end < bytes.len() {
        let next = bytes[end];
        if next.is_ascii_alphanumeric() || next == b'-' {
            return false;
        }
    }
    true
}

/// True when the token contains a `.` followed by an alphabetic character
/// and at least one further alphanumeric character, a dotted suffix of
/// length ≥ 2. Dots followed by a digit (decimals, version strings) do not
/// qualify, and neither does a leading dot.
fn has_dotted_suffix(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    for i in 1..chars.len() {
        if chars[i] != '.' {
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };
        if next.is_ascii_alphabetic()
            && chars.get(i + 2).is_some_and(|c| c.is_ascii_alphanumeric())
        {
            return true;
        }
    }
    false
}
