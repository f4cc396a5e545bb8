use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static UNICODE_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u([0-9A-Fa-f]{4})").expect("valid regex"));

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Keeps at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Splits `text` into parts of at most `max_len` characters.
///
/// Parts break before the last space that still fits; words longer than
/// `max_len` are cut. Concatenating the parts yields the input.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    if max_len == 0 {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut rest = text;
    while let Some((limit, next_char)) = rest.char_indices().nth(max_len) {
        let window = &rest[..limit + next_char.len_utf8()];
        let split_at = match window.rfind(' ') {
            Some(index) if index > 0 => index,
            _ => limit,
        };
        parts.push(rest[..split_at].to_string());
        rest = &rest[split_at..];
    }

    if !rest.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}

/// Splits a free-form keyword list on `,` and `-`.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split([',', '-'])
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decodes literal `\uXXXX` sequences left behind by double-encoded JSON.
pub fn decode_unicode_escapes(text: &str) -> String {
    UNICODE_ESCAPE
        .replace_all(text, |captures: &regex::Captures<'_>| {
            u32::from_str_radix(&captures[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}
