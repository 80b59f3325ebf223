//! Sequential FLV tag-stream reader.

use crate::container::{FileHeader, Tag, HEADER_LEN, TAG_PREFIX_LEN, TRAILER_LEN};
use crate::{codec, Error, Result};
use std::io::{ErrorKind, Read};

/// Sequential reader producing a validated header and then tag records.
///
/// The payload slice handed out by [`read_next`](Self::read_next) borrows a
/// scratch buffer owned by the reader; it is overwritten by the next call,
/// so callers that need the bytes across reads must copy them out first.
#[derive(Debug)]
pub struct TagStreamReader<R> {
    source: R,
    header: FileHeader,
    payload: Vec<u8>,
}

impl<R: Read> TagStreamReader<R> {
    /// Read and validate the file header, then consume the zero sentinel,
    /// leaving the cursor at the first tag.
    pub fn open(mut source: R) -> Result<Self> {
        let mut raw = [0u8; HEADER_LEN];
        source.read_exact(&mut raw).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                Error::invalid_header("file shorter than an FLV header")
            } else {
                Error::Io(e)
            }
        })?;
        let header = FileHeader::parse(&raw)?;

        // Extended headers are legal; skip whatever the length field claims
        // beyond the fixed nine bytes.
        let extra = u64::from(header.header_length) - HEADER_LEN as u64;
        if extra > 0 {
            let skipped = std::io::copy(&mut (&mut source).take(extra), &mut std::io::sink())?;
            if skipped != extra {
                return Err(Error::Truncated {
                    context: "extended header",
                });
            }
        }

        let mut sentinel = [0u8; TRAILER_LEN];
        source
            .read_exact(&mut sentinel)
            .map_err(|e| truncated(e, "header sentinel"))?;
        if sentinel != [0u8; TRAILER_LEN] {
            tracing::debug!(sentinel = ?sentinel, "nonzero previous-tag-size after header");
        }

        Ok(Self {
            source,
            header,
            payload: Vec::new(),
        })
    }

    /// The validated file header.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Read the next tag record.
    ///
    /// Returns `Ok(None)` on a clean end of stream (zero bytes at a record
    /// boundary); a partial prefix, payload, or trailer is
    /// [`Error::Truncated`]. The payload slice is valid only until the next
    /// call on this reader.
    pub fn read_next(&mut self) -> Result<Option<(Tag, &[u8])>> {
        let mut prefix = [0u8; TAG_PREFIX_LEN];
        match read_fully(&mut self.source, &mut prefix)? {
            0 => return Ok(None),
            n if n < TAG_PREFIX_LEN => {
                return Err(Error::Truncated {
                    context: "tag prefix",
                })
            }
            _ => {}
        }
        let tag = Tag::parse_prefix(&prefix)?;

        let len = tag.data_size as usize;
        if self.payload.len() < len {
            self.payload.resize(len, 0);
        }
        self.source
            .read_exact(&mut self.payload[..len])
            .map_err(|e| truncated(e, "tag payload"))?;

        let mut trailer = [0u8; TRAILER_LEN];
        self.source
            .read_exact(&mut trailer)
            .map_err(|e| truncated(e, "tag trailer"))?;
        // Decoded for the log only; the merge path always re-derives it.
        let previous_size = codec::decode_uint(&trailer, 4)?;
        if previous_size != Tag::record_len(len) {
            tracing::debug!(
                declared = previous_size,
                actual = Tag::record_len(len),
                "trailer disagrees with record length"
            );
        }

        Ok(Some((tag, &self.payload[..len])))
    }
}

fn truncated(err: std::io::Error, context: &'static str) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::Truncated { context }
    } else {
        Error::Io(err)
    }
}

/// Read until `buf` is full or the stream ends; returns the bytes read.
fn read_fully<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(filled)
}
