//! Sentence and word tokenization.
//!
//! Remark separators (`\x01`, `\x02`) are hard sentence boundaries. Within a
//! remark, a sentence ends at `.`, `!` or `?` followed by whitespace.
//! Words are lowercased and hyphens become underscores.

use narrative_core::{normalize_token, Sentence};
use once_cell::sync::Lazy;
use regex::Regex;

/// Word runs (with inner hyphens/apostrophes) or single punctuation marks.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:[-']\w+)*|[^\w\s]").expect("valid word pattern"));

const REMARK_SEPARATORS: [char; 2] = ['\x01', '\x02'];

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    for remark in text.split(REMARK_SEPARATORS) {
        let mut start = 0;
        let bytes = remark.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if (b == b'.' || b == b'!' || b == b'?')
                && i + 1 < bytes.len()
                && bytes[i + 1].is_ascii_whitespace()
            {
                let s = remark[start..=i].trim();
                if !s.is_empty() {
                    sentences.push(s);
                }
                start = i + 1;
            }
        }
        let s = remark[start..].trim();
        if !s.is_empty() {
            sentences.push(s);
        }
    }
    sentences
}

/// Tokenize one sentence into normalized tokens.
pub fn tokenize_sentence(sentence: &str) -> Sentence {
    WORD_RE
        .find_iter(sentence)
        .map(|m| normalize_token(m.as_str()))
        .collect()
}

/// Tokenize a whole text: sentence-major, token-minor.
pub fn tokenize_text(text: &str) -> Vec<Sentence> {
    split_sentences(text)
        .into_iter()
        .map(tokenize_sentence)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}
