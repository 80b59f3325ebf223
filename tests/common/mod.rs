//! Shared FLV fixture builder for CLI tests.
//!
//! Assembles files byte by byte so the tests do not depend on the code
//! under test for their inputs.

use std::fs;
use std::path::Path;

fn u24(value: u32) -> [u8; 3] {
    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}

fn push_tag(out: &mut Vec<u8>, kind: u8, timestamp: u32, payload: &[u8]) {
    out.push(kind);
    out.extend_from_slice(&u24(payload.len() as u32));
    out.extend_from_slice(&u24(timestamp));
    out.push((timestamp >> 24) as u8);
    out.extend_from_slice(&[0, 0, 0]);
    out.extend_from_slice(payload);
    out.extend_from_slice(&(11 + payload.len() as u32).to_be_bytes());
}

/// Builder for a minimal but well-formed FLV file.
pub struct FlvFixture {
    data: Vec<u8>,
}

impl FlvFixture {
    pub fn new() -> Self {
        Self {
            data: b"FLV\x01\x05\x00\x00\x00\x09\x00\x00\x00\x00".to_vec(),
        }
    }

    /// Append an onMetaData script tag with the given duration, optionally
    /// carrying a hasKeyframes=true flag and a keyframes index.
    pub fn script(mut self, duration: f64, keyframes: bool) -> Self {
        let mut p = Vec::new();
        p.extend_from_slice(b"\x02\x00\x0aonMetaData\x08\x00\x00\x00\x03");
        p.extend_from_slice(b"\x00\x08duration\x00");
        p.extend_from_slice(&duration.to_be_bytes());
        if keyframes {
            p.extend_from_slice(b"\x00\x0chasKeyframes\x01\x01");
            p.extend_from_slice(b"\x00\x09keyframes\x03");
            p.extend_from_slice(b"\x00\x0dfilepositions\x0a\x00\x00\x00\x01");
            p.extend_from_slice(&13.0f64.to_be_bytes());
            p.extend_from_slice(b"\x00\x00\x09");
        }
        push_tag(&mut self.data, 18, 0, &p);
        self
    }

    pub fn audio(mut self, timestamp: u32, payload: &[u8]) -> Self {
        push_tag(&mut self.data, 8, timestamp, payload);
        self
    }

    pub fn video(mut self, timestamp: u32, payload: &[u8]) -> Self {
        push_tag(&mut self.data, 9, timestamp, payload);
        self
    }

    pub fn write_to(self, path: &Path) {
        fs::write(path, self.data).unwrap();
    }
}
