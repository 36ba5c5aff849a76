//! Wire decoding for response payloads.
//!
//! Pure functions, no state and no I/O. Response content is a raw byte
//! sequence; this module extracts bounds-checked slices from it and converts
//! fixed-width scalars.
//!
//! The sensor firmware emits multi-byte scalars byte-reversed relative to
//! network order, so every scalar conversion here reverses the bytes before
//! reading them big-endian. Getting this wrong does not fail loudly, it
//! silently corrupts every decoded value, which is why the encoders live
//! next to the decoders and the round-trip is pinned by tests.
//!
//! # Example
//!
//! ```
//! use ndn_sensor_client::wire;
//!
//! let payload = wire::encode_f64(21.5);
//! assert_eq!(wire::decode_f64(&payload).unwrap(), 21.5);
//! ```

use bytes::Bytes;

use crate::error::WireError;

/// Width of a wire i64 in bytes.
pub const I64_WIDTH: usize = 8;
/// Width of a wire f32 in bytes.
pub const F32_WIDTH: usize = 4;
/// Width of a wire f64 in bytes.
pub const F64_WIDTH: usize = 8;

/// Copy exactly `length` bytes starting at `offset` out of `content`.
///
/// An empty source yields an empty slice regardless of the requested range;
/// the forwarder represents absent content as an empty buffer and absence is
/// not an error. A non-empty source that is too short for the requested
/// range is [`WireError::OutOfBounds`].
pub fn content_slice(content: &[u8], length: usize, offset: usize) -> Result<Bytes, WireError> {
    if content.is_empty() {
        return Ok(Bytes::new());
    }

    let end = offset.checked_add(length).ok_or(WireError::OutOfBounds {
        offset,
        length,
        size: content.len(),
    })?;
    if end > content.len() {
        return Err(WireError::OutOfBounds {
            offset,
            length,
            size: content.len(),
        });
    }

    Ok(Bytes::copy_from_slice(&content[offset..end]))
}

/// Decode a byte-reversed i64.
pub fn decode_i64(bytes: &[u8]) -> Result<i64, WireError> {
    Ok(i64::from_be_bytes(reversed(bytes)?))
}

/// Decode a byte-reversed f32.
pub fn decode_f32(bytes: &[u8]) -> Result<f32, WireError> {
    Ok(f32::from_be_bytes(reversed(bytes)?))
}

/// Decode a byte-reversed f64.
pub fn decode_f64(bytes: &[u8]) -> Result<f64, WireError> {
    Ok(f64::from_be_bytes(reversed(bytes)?))
}

/// Encode an i64 in the wire's reversed byte order.
pub fn encode_i64(value: i64) -> [u8; I64_WIDTH] {
    let mut bytes = value.to_be_bytes();
    bytes.reverse();
    bytes
}

/// Encode an f32 in the wire's reversed byte order.
pub fn encode_f32(value: f32) -> [u8; F32_WIDTH] {
    let mut bytes = value.to_be_bytes();
    bytes.reverse();
    bytes
}

/// Encode an f64 in the wire's reversed byte order.
pub fn encode_f64(value: f64) -> [u8; F64_WIDTH] {
    let mut bytes = value.to_be_bytes();
    bytes.reverse();
    bytes
}

/// Copy `bytes` into a fixed-width array, reversed.
///
/// Requires exactly `N` input bytes; anything else is a bounds failure.
fn reversed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], WireError> {
    let mut buf: [u8; N] = bytes.try_into().map_err(|_| WireError::OutOfBounds {
        offset: 0,
        length: N,
        size: bytes.len(),
    })?;
    buf.reverse();
    Ok(buf)
}
