//! Sequential FLV tag-stream writer.

use crate::container::{FileHeader, Tag, TRAILER_LEN};
use crate::{codec, Result};
use bytes::{BufMut, BytesMut};
use std::io::{Seek, SeekFrom, Write};

/// Writer for the output tag stream, wrapping one seekable sink.
pub struct TagStreamWriter<W> {
    sink: W,
    scratch: BytesMut,
}

impl<W: Write + Seek> TagStreamWriter<W> {
    /// Wrap a sink positioned at the start of the output.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            scratch: BytesMut::with_capacity(4096),
        }
    }

    /// Current write position in the sink.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.sink.stream_position()?)
    }

    /// Write the 9-byte file header.
    pub fn write_header(&mut self, header: &FileHeader) -> Result<()> {
        self.sink.write_all(&header.to_bytes())?;
        Ok(())
    }

    /// Write the zero previous-tag-size that precedes the first tag.
    pub fn write_sentinel(&mut self) -> Result<()> {
        self.sink.write_all(&[0u8; TRAILER_LEN])?;
        Ok(())
    }

    /// Write one tag record: prefix, payload, trailer.
    ///
    /// The length fields are always derived from the supplied payload, not
    /// from `tag.data_size`, so prefix and trailer can never disagree with
    /// the bytes actually written. Returns the number of bytes written.
    pub fn write_tag(&mut self, tag: &Tag, payload: &[u8]) -> Result<u64> {
        let mut tag = *tag;
        tag.data_size = payload.len() as u32;

        self.scratch.clear();
        self.scratch.put_slice(&tag.encode_prefix());
        self.scratch.put_slice(payload);
        self.scratch.put_u32(Tag::record_len(payload.len()));
        self.sink.write_all(&self.scratch)?;
        Ok(self.scratch.len() as u64)
    }

    /// Seek to `offset` and overwrite eight bytes with a big-endian double.
    pub fn patch_f64(&mut self, offset: u64, value: f64) -> Result<()> {
        self.sink.seek(SeekFrom::Start(offset))?;
        self.sink.write_all(&codec::encode_f64(value))?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
