//! headers/types.rs
//! Header format registry, decoded header views and header errors.
//!
//! Notes:
//! - Sizes are `u64` on the payload side (file lengths) and `i64` on the
//!   requested header size, so a negative request can be rejected instead of
//!   being unrepresentable.
//! - The effective header size is always resolved through `HeaderFormat::header_len`,
//!   both when encoding and when decoding.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::format_ids;
use crate::constants::{HEX_ASCII_HEADER_LEN, MAGIC_NEWP, MAGIC_NEWPATCH, MIN_HEADER_SIZE};
use crate::utils::fmt_bytes;

/// Wire format of the patch header.
///
/// The two formats are mutually incompatible: a loader built for one will not
/// recognise the other.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderFormat {
    /// `"NEWPATCH"` + `"0x"` + 14 hex digits. Fixed 24 bytes.
    HexAsciiV1 = format_ids::HEX_ASCII_V1,
    /// `"NEWP"` + little-endian size, width = header size - 4.
    BinaryLeV2 = format_ids::BINARY_LE_V2,
}

// Not `#[default]`: num_enum would treat it as the catch-all for unknown ids.
impl Default for HeaderFormat {
    fn default() -> Self {
        HeaderFormat::BinaryLeV2
    }
}

impl HeaderFormat {
    pub fn verify(raw: u16) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw).map_err(|_| HeaderError::UnknownFormat { raw })
    }

    /// Magic marker at offset 0.
    pub const fn magic(self) -> &'static [u8] {
        match self {
            HeaderFormat::HexAsciiV1 => &MAGIC_NEWPATCH,
            HeaderFormat::BinaryLeV2 => &MAGIC_NEWP,
        }
    }

    /// Resolve the effective header length for a requested size.
    ///
    /// - Negative requests are a caller bug and are rejected.
    /// - `BinaryLeV2` raises anything below 8 to 8. There is no upper bound
    ///   beyond what `usize` can address.
    /// - `HexAsciiV1` is always 24 bytes.
    pub fn header_len(self, requested: i64) -> Result<usize, HeaderError> {
        if requested < 0 {
            return Err(HeaderError::InvalidHeaderSize { requested });
        }
        match self {
            HeaderFormat::HexAsciiV1 => Ok(HEX_ASCII_HEADER_LEN),
            HeaderFormat::BinaryLeV2 => {
                let effective = requested.max(MIN_HEADER_SIZE as i64);
                usize::try_from(effective).map_err(|_| HeaderError::InvalidHeaderSize { requested })
            }
        }
    }

    /// Bytes available for the size field in a header of `header_len` bytes.
    #[inline]
    pub const fn size_field_width(self, header_len: usize) -> usize {
        header_len - self.magic().len()
    }
}

/// A header as the loader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchHeader {
    pub format: HeaderFormat,
    /// Total header length; the payload starts at this offset.
    pub header_size: usize,
    pub payload_size: u64,
}

impl PatchHeader {
    /// Offset one past the last payload byte.
    pub fn end_offset(&self) -> u64 {
        self.header_size as u64 + self.payload_size
    }
}

/// Output of the encoder: header bytes plus the advisory capacity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHeader {
    pub format: HeaderFormat,
    pub bytes: Vec<u8>,
    /// `false` when header + payload exceed the declared partition size.
    /// Advisory only; the header is valid either way.
    pub fits: bool,
}

impl EncodedHeader {
    #[inline]
    pub fn header_size(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for EncodedHeader {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// State of a patch partition's header region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// A patch is waiting to be applied.
    Pending(PatchHeader),
    /// The magic was overwritten by the loader after applying.
    Applied,
    /// No recognisable header (erased flash, foreign data).
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Payload length cannot be represented in the size field.
    #[error("payload size {size:#x} does not fit in a {width}-byte size field")]
    OversizedPayload { size: u64, width: usize },

    /// Requested header size is negative, or not addressable on this target.
    #[error("invalid header size: {requested}")]
    InvalidHeaderSize { requested: i64 },

    /// Buffer too short to contain the header.
    #[error("header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Magic marker mismatch.
    #[error("invalid magic: expected {}, got {}", fmt_bytes(.need), fmt_bytes(.have))]
    InvalidMagic { have: Vec<u8>, need: &'static [u8] },

    /// Size field is not a valid encoding for the format.
    #[error("invalid size field: {}", fmt_bytes(.field))]
    InvalidSizeField { field: Vec<u8> },

    /// Unknown format identifier.
    #[error("unknown header format: {raw:#06x}")]
    UnknownFormat { raw: u16 },
}
