//! Script-data (onMetaData) payload inspection and editing.
//!
//! FLV metadata is AMF0-encoded. The merge path needs only three markers
//! out of it, located by byte-pattern search rather than a full AMF
//! parser: the `duration` number, the `hasKeyframes` boolean, and the
//! `keyframes` object that introduces the seek index.

use crate::container::{Tag, TagKind};
use crate::{codec, search, Error, Result};

/// Property name `duration` followed by the AMF0 number type marker; the
/// 8-byte value comes right after.
const DURATION_MARKER: &[u8] = b"duration\x00";
/// Property name `hasKeyframes` followed by the AMF0 boolean type marker;
/// the value byte comes right after.
const HAS_KEYFRAMES_MARKER: &[u8] = b"hasKeyframes\x01";
/// Length-prefixed property name `keyframes` followed by the AMF0 object
/// type marker. Everything from here on is the seek index.
const KEYFRAMES_MARKER: &[u8] = b"\x00\x09keyframes\x03";

/// Locate and decode the `duration` property.
///
/// Returns the duration in seconds and the byte offset of its 8-byte value
/// within `payload`, so the field can later be patched in place.
pub fn read_duration(payload: &[u8]) -> Result<(f64, usize)> {
    let index =
        find_marker(DURATION_MARKER, payload)?.ok_or(Error::MarkerNotFound("duration"))?;
    let value_offset = index + DURATION_MARKER.len();
    let value = codec::decode_f64(payload.get(value_offset..).unwrap_or_default())?;
    Ok((value, value_offset))
}

/// Rewrite a script payload so it no longer advertises or carries a
/// keyframe index, and sync `tag.data_size` with the final payload length.
///
/// The index stores byte offsets into the original file, which stop being
/// valid once tags from several files are interleaved, so it is dropped
/// rather than recomputed: `hasKeyframes` is flipped to false if present,
/// and the payload is truncated at the `keyframes` property if present.
/// Absent markers leave the payload unchanged.
pub fn strip_keyframes(tag: &mut Tag, payload: &mut Vec<u8>) -> Result<()> {
    debug_assert_eq!(tag.kind, TagKind::Script);

    if let Some(index) = find_marker(HAS_KEYFRAMES_MARKER, payload)? {
        let value_index = index + HAS_KEYFRAMES_MARKER.len();
        if let Some(value) = payload.get_mut(value_index) {
            *value = 0;
        }
    }
    if let Some(index) = find_marker(KEYFRAMES_MARKER, payload)? {
        payload.truncate(index);
        tracing::debug!(new_len = payload.len(), "keyframe index stripped");
    }
    tag.data_size = payload.len() as u32;
    Ok(())
}

/// [`search::find`], except a haystack too small to hold the pattern counts
/// as no match instead of an argument error.
fn find_marker(pattern: &[u8], haystack: &[u8]) -> Result<Option<usize>> {
    if haystack.len() < pattern.len() {
        return Ok(None);
    }
    search::find(pattern, haystack)
}
