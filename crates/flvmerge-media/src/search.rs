//! Naive byte-pattern search over in-memory buffers.

use crate::{Error, Result};

/// Find the first occurrence of `pattern` in `haystack`.
///
/// Plain O(n·m) window scan. It is only ever applied to script-tag
/// payloads, which are at most a few kilobytes, so nothing smarter is
/// warranted; the leftmost match wins when matches overlap.
pub fn find(pattern: &[u8], haystack: &[u8]) -> Result<Option<usize>> {
    if pattern.is_empty() || pattern.len() > haystack.len() {
        return Err(Error::InvalidPattern {
            pattern_len: pattern.len(),
            haystack_len: haystack.len(),
        });
    }
    Ok(haystack
        .windows(pattern.len())
        .position(|window| window == pattern))
}
