//! Big-endian codec for FLV's fixed-width numeric fields.
//!
//! FLV stores every multi-byte number big-endian. Values are assembled and
//! disassembled with explicit shifts so the result is the same on any host
//! byte order.

use crate::{Error, Result};

/// Decode a big-endian unsigned integer of `size` bytes (1..=4) from the
/// front of `bytes`.
pub fn decode_uint(bytes: &[u8], size: usize) -> Result<u32> {
    if !(1..=4).contains(&size) {
        return Err(Error::InvalidFieldSize { size });
    }
    let field = bytes.get(..size).ok_or(Error::Truncated {
        context: "integer field",
    })?;
    let mut value = 0u32;
    for &b in field {
        value = (value << 8) | u32::from(b);
    }
    Ok(value)
}

/// Encode `value` big-endian into the first `size` bytes (1..=4) of `out`.
/// Bits above the field width are discarded.
pub fn encode_uint(value: u32, size: usize, out: &mut [u8]) -> Result<()> {
    if !(1..=4).contains(&size) {
        return Err(Error::InvalidFieldSize { size });
    }
    let field = out.get_mut(..size).ok_or(Error::Truncated {
        context: "integer field",
    })?;
    for (i, b) in field.iter_mut().enumerate() {
        *b = (value >> (8 * (size - 1 - i))) as u8;
    }
    Ok(())
}

/// Encode the low 24 bits of `value` as the 3-byte big-endian form used by
/// tag length, timestamp, and stream-id fields.
pub fn encode_u24(value: u32) -> [u8; 3] {
    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}

/// Decode a big-endian IEEE-754 double from the front of `bytes`.
pub fn decode_f64(bytes: &[u8]) -> Result<f64> {
    let field: [u8; 8] = bytes
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::Truncated {
            context: "double field",
        })?;
    Ok(f64::from_be_bytes(field))
}

/// Encode a double as its 8-byte big-endian form.
pub fn encode_f64(value: f64) -> [u8; 8] {
    value.to_be_bytes()
}
