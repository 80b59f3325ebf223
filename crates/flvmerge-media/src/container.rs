//! FLV container model: file header, tag kinds, and tag records.

use crate::{codec, Error, Result};

/// FLV file signature.
pub const SIGNATURE: [u8; 3] = *b"FLV";
/// Serialized size of the file header.
pub const HEADER_LEN: usize = 9;
/// Serialized size of a tag's fixed prefix.
pub const TAG_PREFIX_LEN: usize = 11;
/// Size of the previous-tag-size field that follows the header and every tag.
pub const TRAILER_LEN: usize = 4;
/// Largest payload a 3-byte length field can describe.
pub const MAX_PAYLOAD: u32 = 0x00FF_FFFF;

/// Header flag bit: file carries audio tags.
pub const FLAG_AUDIO: u8 = 0x01;
/// Header flag bit: file carries video tags.
pub const FLAG_VIDEO: u8 = 0x04;

/// Parsed FLV file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version, 1 for every FLV in the wild.
    pub version: u8,
    /// Audio/video presence flags; reserved bits must be zero.
    pub flags: u8,
    /// Offset from the file start to the first previous-tag-size field,
    /// normally 9.
    pub header_length: u32,
}

impl FileHeader {
    /// Parse and validate the 9 on-disk header bytes.
    pub fn parse(raw: &[u8; HEADER_LEN]) -> Result<Self> {
        if raw[..3] != SIGNATURE {
            return Err(Error::invalid_header(format!(
                "bad signature {:02x?}",
                &raw[..3]
            )));
        }
        let flags = raw[4];
        if flags & !(FLAG_AUDIO | FLAG_VIDEO) != 0 {
            return Err(Error::invalid_header(format!(
                "reserved flag bits set: {flags:#04x}"
            )));
        }
        let header_length = codec::decode_uint(&raw[5..9], 4)?;
        if header_length < HEADER_LEN as u32 {
            return Err(Error::invalid_header(format!(
                "header length {header_length} shorter than the fixed header"
            )));
        }
        Ok(Self {
            version: raw[3],
            flags,
            header_length,
        })
    }

    /// Whether the audio-present flag is set.
    pub fn has_audio(&self) -> bool {
        self.flags & FLAG_AUDIO != 0
    }

    /// Whether the video-present flag is set.
    pub fn has_video(&self) -> bool {
        self.flags & FLAG_VIDEO != 0
    }

    /// Serialize back to the 9 on-disk bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..3].copy_from_slice(&SIGNATURE);
        out[3] = self.version;
        out[4] = self.flags;
        out[5..9].copy_from_slice(&self.header_length.to_be_bytes());
        out
    }
}

/// Classified tag kind byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Audio,
    Video,
    /// Script-data (metadata) tag.
    Script,
    /// Recognized but unhandled kind, carried for diagnostics.
    Other(u8),
}

impl TagKind {
    /// Classify a raw kind byte.
    pub fn from_byte(raw: u8) -> Self {
        match raw {
            8 => Self::Audio,
            9 => Self::Video,
            18 => Self::Script,
            other => Self::Other(other),
        }
    }

    /// The on-disk kind byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Audio => 8,
            Self::Video => 9,
            Self::Script => 18,
            Self::Other(raw) => raw,
        }
    }

    /// Audio or video.
    pub fn is_media(self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }
}

/// Fixed prefix of one tag record. The payload travels separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    /// Declared payload length (3-byte field).
    pub data_size: u32,
    /// Timestamp in milliseconds, the 3-byte low part and 1-byte extension
    /// combined into one value.
    pub timestamp: u32,
    /// Stream id; zero in practice, carried through unchanged.
    pub stream_id: u32,
}

impl Tag {
    /// Parse the 11-byte tag prefix.
    pub fn parse_prefix(raw: &[u8; TAG_PREFIX_LEN]) -> Result<Self> {
        let data_size = codec::decode_uint(&raw[1..4], 3)?;
        let ts_low = codec::decode_uint(&raw[4..7], 3)?;
        let ts_ext = raw[7];
        let stream_id = codec::decode_uint(&raw[8..11], 3)?;
        Ok(Self {
            kind: TagKind::from_byte(raw[0]),
            data_size,
            timestamp: (u32::from(ts_ext) << 24) | ts_low,
            stream_id,
        })
    }

    /// Serialize the 11-byte tag prefix.
    pub fn encode_prefix(&self) -> [u8; TAG_PREFIX_LEN] {
        let mut out = [0u8; TAG_PREFIX_LEN];
        out[0] = self.kind.as_byte();
        out[1..4].copy_from_slice(&codec::encode_u24(self.data_size));
        out[4..7].copy_from_slice(&codec::encode_u24(self.timestamp));
        out[7] = (self.timestamp >> 24) as u8;
        out[8..11].copy_from_slice(&codec::encode_u24(self.stream_id));
        out
    }

    /// Total serialized length of a record with the given payload: the value
    /// every trailer must carry.
    pub fn record_len(payload_len: usize) -> u32 {
        (TAG_PREFIX_LEN + payload_len) as u32
    }
}
