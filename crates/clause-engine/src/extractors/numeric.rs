// Numeric extraction with surrounding context for clause comparison
use crate::patterns::NUMBER_PATTERN;
use shared_types::NumericToken;

/// Context window used when the configuration does not override it
pub const DEFAULT_CONTEXT_SIZE: usize = 30;

/// Extracts every digit run in `text`, in order of appearance
///
/// Context is counted in characters, not bytes, clipped at the text bounds
/// and trimmed.
pub fn extract_numbers(text: &str, context_size: usize) -> Vec<NumericToken> {
    NUMBER_PATTERN
        .find_iter(text)
        .map(|m| {
            let before = tail_chars(&text[..m.start()], context_size);
            let after = head_chars(&text[m.end()..], context_size);
            NumericToken::new(m.as_str(), before.trim(), after.trim())
        })
        .collect()
}

fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
