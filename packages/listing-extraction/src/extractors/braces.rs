//! Best-effort extraction of JSON object literals from script text.
//!
//! No JavaScript parser: find balanced `{...}` spans, try to parse each, and
//! descend into a span's nested spans when the span itself is not JSON.

use serde_json::Value;

/// Upper bound on parse attempts per script.
pub const MAX_PARSE_ATTEMPTS: usize = 256;

/// Upper bound on unterminated spans skipped per scan.
pub const MAX_UNCLOSED_SPANS: usize = 64;

/// Index of the `}` closing the `{` at `open`.
///
/// Quotes (`"`, `'`, `` ` ``) are tracked inside the span so braces in
/// string literals do not count, and `//` and `/* */` comments are skipped.
/// `None` when the span never closes.
pub fn matching_brace(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match (b, bytes.get(i + 1)) {
            (b'/', Some(b'/')) => {
                i = memchr_from(bytes, b'\n', i + 2)?;
            }
            (b'/', Some(b'*')) => {
                i = src[i + 2..].find("*/").map(|end| i + 2 + end + 1)?;
            }
            (b'"' | b'\'' | b'`', _) => quote = Some(b),
            (b'{', _) => depth += 1,
            (b'}', _) => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn memchr_from(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|pos| from + pos)
}

/// Top-level balanced `{...}` spans as `(start, end_exclusive)`.
///
/// A `{` that never closes (a brace in a regex literal, an apostrophe the
/// quote tracking misread) is stepped over and scanning resumes right after
/// it.
pub fn top_level_spans(src: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0;
    let mut unclosed = 0;

    while let Some(offset) = src[pos..].find('{') {
        let open = pos + offset;
        match matching_brace(src, open) {
            Some(close) => {
                spans.push((open, close + 1));
                pos = close + 1;
            }
            None => {
                unclosed += 1;
                if unclosed > MAX_UNCLOSED_SPANS {
                    break;
                }
                pos = open + 1;
            }
        }
    }
    spans
}

/// Every JSON object that can be recovered from `src`, in document order.
pub fn parse_objects(src: &str) -> Vec<Value> {
    let mut found = Vec::new();
    let mut attempts = 0;
    collect(src, &mut found, &mut attempts);
    found
}

fn collect(src: &str, found: &mut Vec<Value>, attempts: &mut usize) {
    for (start, end) in top_level_spans(src) {
        if *attempts >= MAX_PARSE_ATTEMPTS {
            return;
        }
        *attempts += 1;

        let span = &src[start..end];
        match serde_json::from_str::<Value>(span) {
            Ok(value @ Value::Object(_)) => found.push(value),
            Ok(_) => {}
            Err(e) => {
                tracing::trace!(
                    error = %e,
                    len = span.len(),
                    "Span is not JSON, trying nested spans"
                );
                collect(&span[1..span.len() - 1], found, attempts);
            }
        }
    }
}
