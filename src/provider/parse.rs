//! Reading candidate events out of provider text
//!
//! The provider is asked for a bare JSON array but usually wraps it in
//! prose or code fences. The parser takes the first balanced `[...]`
//! (brackets inside JSON strings are ignored), and only if there is none
//! tries the whole text. Anything that is not an array of candidate
//! objects with correctly typed fields is a [`CacheError::Parse`].

use crate::error::{CacheError, CacheResult};
use crate::types::RawCandidate;

/// Byte range of the first balanced top-level `[...]` in `text`
pub fn find_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse provider text into candidates
pub fn parse_candidates(text: &str) -> CacheResult<Vec<RawCandidate>> {
    let payload = find_json_array(text).unwrap_or_else(|| text.trim());
    if payload.is_empty() {
        return Err(CacheError::Parse("empty provider response".to_string()));
    }

    serde_json::from_str::<Vec<RawCandidate>>(payload)
        .map_err(|e| CacheError::Parse(format!("expected a JSON array of events: {}", e)))
}
