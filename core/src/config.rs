//! config.rs
//! Parameters for one patch preparation run.
//!
//! Sizes may be given as JSON numbers or as strings in any base `0x`/`0o`/`0b`
//! notation, so partition sizes can be copied straight from a flash map.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DEFAULT_HEADER_SIZE;
use crate::headers::{encode_header_with, EncodedHeader, HeaderError, HeaderFormat};
use crate::types::PatchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchConfig {
    #[serde(default)]
    pub format: HeaderFormat,
    /// Requested header size; raised to 8 for the binary format.
    #[serde(default = "default_header_size", deserialize_with = "de_i64")]
    pub header_size: i64,
    /// Declared capacity of the patch partition, header included.
    #[serde(deserialize_with = "de_u64")]
    pub max_partition_size: u64,
}

fn default_header_size() -> i64 {
    DEFAULT_HEADER_SIZE as i64
}

impl PatchConfig {
    pub fn new(max_partition_size: u64) -> Self {
        Self {
            format: HeaderFormat::default(),
            header_size: default_header_size(),
            max_partition_size,
        }
    }

    pub fn with_format(mut self, format: HeaderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_header_size(mut self, header_size: i64) -> Self {
        self.header_size = header_size;
        self
    }

    pub fn from_json(s: &str) -> Result<Self, PatchError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Encode the header for a payload of `payload_size` bytes under this config.
    pub fn encode(&self, payload_size: u64) -> Result<EncodedHeader, HeaderError> {
        encode_header_with(self.format, payload_size, self.header_size, self.max_partition_size)
    }
}

/// Parse an integer literal with base prefix, as Python's `int(s, 0)` does.
///
/// Accepts an optional sign, `0x`/`0o`/`0b` (any case), and single `_`
/// separators between digits. Decimal literals may not have leading zeros.
pub fn parse_int(s: &str) -> Result<i128, PatchError> {
    let invalid = || PatchError::Config(format!("invalid integer literal: {s:?}"));

    let t = s.trim();
    let (negative, t) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };

    let lower = t.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, lower.as_str())
    };

    // A prefix may be followed by one `_` ("0x_ff").
    let body = if radix != 10 { body.strip_prefix('_').unwrap_or(body) } else { body };
    if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return Err(invalid());
    }
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid());
    }

    if radix == 10 && digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return Err(invalid());
    }

    let magnitude = i128::from_str_radix(&digits, radix).map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl IntOrString {
    fn into_i128(self) -> Result<i128, PatchError> {
        match self {
            IntOrString::Unsigned(v) => Ok(v as i128),
            IntOrString::Signed(v) => Ok(v as i128),
            IntOrString::Text(s) => parse_int(&s),
        }
    }
}

fn de_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = IntOrString::deserialize(d)?
        .into_i128()
        .map_err(serde::de::Error::custom)?;
    i64::try_from(v).map_err(|_| serde::de::Error::custom(format!("value out of range: {v}")))
}

fn de_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let v = IntOrString::deserialize(d)?
        .into_i128()
        .map_err(serde::de::Error::custom)?;
    u64::try_from(v).map_err(|_| serde::de::Error::custom(format!("value out of range: {v}")))
}
