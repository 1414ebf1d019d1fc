//! src/headers/encode.rs
//!
//! Header encoding.
//!
//! Design notes:
//! - Pure computation: no I/O, no retained state.
//! - Oversized payloads fail instead of being truncated; a wrapped size field
//!   would make the loader read a short patch silently.
//! - The capacity check never fails encoding. It is reported through `fits`.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::constants::{HEX_DIGITS, HEX_PREFIX, MAGIC_NEWP, MAGIC_NEWPATCH};
use crate::headers::types::{EncodedHeader, HeaderError, HeaderFormat};

/// Encode a canonical (`BinaryLeV2`) header for a payload of `payload_size` bytes.
///
/// # Returns
/// - `Ok(EncodedHeader)` holding `max(requested_header_size, 8)` header bytes
///   and the advisory `fits` flag.
/// - `Err(HeaderError::InvalidHeaderSize)` for a negative request.
/// - `Err(HeaderError::OversizedPayload)` if the size does not fit in
///   `header_size - 4` bytes.
///
/// # Example
/// ```
/// use patch_core::headers::encode_header;
///
/// let h = encode_header(256, 8, 1024).unwrap();
/// assert_eq!(h.bytes, b"NEWP\x00\x01\x00\x00");
/// assert!(h.fits);
/// ```
#[inline]
pub fn encode_header(
    payload_size: u64,
    requested_header_size: i64,
    max_partition_size: u64,
) -> Result<EncodedHeader, HeaderError> {
    encode_header_with(
        HeaderFormat::BinaryLeV2,
        payload_size,
        requested_header_size,
        max_partition_size,
    )
}

/// Encode a header in an explicit format.
pub fn encode_header_with(
    format: HeaderFormat,
    payload_size: u64,
    requested_header_size: i64,
    max_partition_size: u64,
) -> Result<EncodedHeader, HeaderError> {
    let header_size = format.header_len(requested_header_size)?;

    let bytes = match format {
        HeaderFormat::BinaryLeV2 => encode_binary_le(payload_size, header_size)?,
        HeaderFormat::HexAsciiV1 => encode_hex_ascii(payload_size)?,
    };
    debug_assert_eq!(bytes.len(), header_size, "encoding wrote incorrect length");

    let fits = fits_partition(payload_size, header_size, max_partition_size);
    debug!(?format, payload_size, header_size, max_partition_size, fits, "encoded patch header");

    Ok(EncodedHeader { format, bytes, fits })
}

/// `(max_partition_size - header_size) >= payload_size`.
///
/// A partition smaller than the header itself never fits.
#[inline]
pub fn fits_partition(payload_size: u64, header_size: usize, max_partition_size: u64) -> bool {
    max_partition_size
        .checked_sub(header_size as u64)
        .is_some_and(|room| room >= payload_size)
}

/// True if `value < 256^width`.
#[inline]
fn fits_width(value: u64, width: usize) -> bool {
    width >= 8 || value >> (8 * width) == 0
}

fn encode_binary_le(payload_size: u64, header_size: usize) -> Result<Vec<u8>, HeaderError> {
    let width = HeaderFormat::BinaryLeV2.size_field_width(header_size);
    if !fits_width(payload_size, width) {
        return Err(HeaderError::OversizedPayload { size: payload_size, width });
    }

    let mut out = vec![0u8; header_size];
    out[..MAGIC_NEWP.len()].copy_from_slice(&MAGIC_NEWP);

    // Bytes past the eighth stay zero: they are the high bytes of the integer.
    let n = width.min(8);
    let field = &mut out[MAGIC_NEWP.len()..];
    LittleEndian::write_uint(&mut field[..n], payload_size, n);

    Ok(out)
}

fn encode_hex_ascii(payload_size: u64) -> Result<Vec<u8>, HeaderError> {
    if payload_size >> (4 * HEX_DIGITS) != 0 {
        return Err(HeaderError::OversizedPayload {
            size: payload_size,
            width: HEX_PREFIX.len() + HEX_DIGITS,
        });
    }

    let digits = format!("{:0width$x}", payload_size, width = HEX_DIGITS);

    let mut out = Vec::with_capacity(MAGIC_NEWPATCH.len() + HEX_PREFIX.len() + HEX_DIGITS);
    out.extend_from_slice(&MAGIC_NEWPATCH);
    out.extend_from_slice(HEX_PREFIX);
    out.extend_from_slice(digits.as_bytes());
    Ok(out)
}
