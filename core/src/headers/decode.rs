//! src/headers/decode.rs
//!
//! Loader-side header handling.
//!
//! Design notes:
//! - `decode_header` is the exact inverse of the encoder for both formats.
//! - Hex sizes are parsed the way the device's `strtol` reads them: optional
//!   `0x`/`0X`, either case, NUL padding tolerated at the end.
//! - After applying a patch the loader overwrites the magic with `'F'` so it
//!   is not applied twice; `inspect_header` tells the three states apart.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::constants::APPLIED_FILL;
use crate::headers::types::{HeaderError, HeaderFormat, HeaderState, PatchHeader};

/// Decode a header from the start of `buf`.
///
/// `header_size` is resolved the same way as on the encoding side, so the
/// value the patch was prepared with can be passed through unchanged.
pub fn decode_header(
    buf: &[u8],
    format: HeaderFormat,
    header_size: i64,
) -> Result<PatchHeader, HeaderError> {
    let len = format.header_len(header_size)?;
    if buf.len() < len {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: len });
    }

    check_magic(buf, format)?;

    let field = &buf[format.magic().len()..len];
    let payload_size = match format {
        HeaderFormat::BinaryLeV2 => parse_le_size(field)?,
        HeaderFormat::HexAsciiV1 => parse_hex_size(field)?,
    };

    Ok(PatchHeader { format, header_size: len, payload_size })
}

/// Classify the header region of a patch partition.
pub fn inspect_header(
    buf: &[u8],
    format: HeaderFormat,
    header_size: i64,
) -> Result<HeaderState, HeaderError> {
    let magic = format.magic();
    if buf.len() < magic.len() {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: magic.len() });
    }

    let head = &buf[..magic.len()];
    let state = if head == magic {
        HeaderState::Pending(decode_header(buf, format, header_size)?)
    } else if head.iter().all(|&b| b == APPLIED_FILL) {
        HeaderState::Applied
    } else {
        HeaderState::Absent
    };

    debug!(?format, ?state, "inspected patch header");
    Ok(state)
}

/// Overwrite the magic with the applied marker, in place.
///
/// Only a pending header can be marked; the size field is left as is.
pub fn mark_applied(buf: &mut [u8], format: HeaderFormat) -> Result<(), HeaderError> {
    let n = format.magic().len();
    if buf.len() < n {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: n });
    }
    check_magic(buf, format)?;

    buf[..n].fill(APPLIED_FILL);
    Ok(())
}

fn check_magic(buf: &[u8], format: HeaderFormat) -> Result<(), HeaderError> {
    let magic = format.magic();
    let have = &buf[..magic.len()];
    if have != magic {
        return Err(HeaderError::InvalidMagic { have: have.to_vec(), need: magic });
    }
    Ok(())
}

fn parse_le_size(field: &[u8]) -> Result<u64, HeaderError> {
    let n = field.len().min(8);

    // Anything past the eighth byte must be zero to fit in u64.
    if field[n..].iter().any(|&b| b != 0) {
        return Err(HeaderError::InvalidSizeField { field: field.to_vec() });
    }
    Ok(LittleEndian::read_uint(&field[..n], n))
}

fn parse_hex_size(field: &[u8]) -> Result<u64, HeaderError> {
    let invalid = || HeaderError::InvalidSizeField { field: field.to_vec() };

    let end = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let text = std::str::from_utf8(&field[..end]).map_err(|_| invalid())?;
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u64::from_str_radix(digits, 16).map_err(|_| invalid())
}
