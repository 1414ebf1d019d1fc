//! headers/mod.rs
//! Patch header layouts, encoder and loader-side decoder.
//!
//! Notes:
//! - Two wire formats exist and they are not interchangeable. The format is
//!   always passed explicitly; `HeaderFormat::default()` is the binary one.
//! - `BinaryLeV2`: `"NEWP"` + payload size as unsigned little-endian, the size
//!   field width derived from the configured header size (minimum 8 bytes total).
//! - `HexAsciiV1`: `"NEWPATCH"` + `"0x"` + 14 hex digits, 24 bytes fixed.
//! - The header is written directly in front of the payload; the loader reads
//!   the payload starting at offset `header_size`.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
