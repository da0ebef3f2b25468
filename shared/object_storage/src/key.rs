//! Storage-key normalization

use tracing::debug;

/// Normalizes a path-like identifier into a canonical storage key.
///
/// Runs of consecutive `/` separators collapse into a single separator, then
/// exactly one leading separator is stripped. No other characters change.
/// Total for every input and idempotent; the empty string and `"/"` both
/// normalize to the empty string.
#[must_use]
pub fn normalize_key(path: &str) -> String {
    let mut key = String::with_capacity(path.len());
    let mut prev_sep = false;
    for ch in path.chars() {
        if ch == '/' {
            if prev_sep {
                continue;
            }
            prev_sep = true;
        } else {
            prev_sep = false;
        }
        key.push(ch);
    }

    if key.starts_with('/') {
        key.remove(0);
    }

    debug!("normalized key {path:?} -> {key:?}");
    key
}
