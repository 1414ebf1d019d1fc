/// Magic marker for the binary little-endian header.
/// "NEWP" = new patch, size follows as raw LE integer.
pub const MAGIC_NEWP: [u8; 4] = *b"NEWP";

/// Tag for the legacy hex-ASCII header.
pub const MAGIC_NEWPATCH: [u8; 8] = *b"NEWPATCH";

/// Byte the loader writes over the magic once a patch has been applied.
pub const APPLIED_FILL: u8 = b'F';

/// Minimum total header length for the binary format (4 magic + 4 size bytes).
pub const MIN_HEADER_SIZE: usize = 8;

/// Header size the loader reads by default (`HEADER_SIZE` on the device side).
pub const DEFAULT_HEADER_SIZE: usize = 0x18;

/// Legacy hex-ASCII header: tag, then `"0x"`, then the zero-padded digits.
pub const HEX_PREFIX: &[u8; 2] = b"0x";
pub const HEX_DIGITS: usize = 14;
pub const HEX_ASCII_HEADER_LEN: usize = MAGIC_NEWPATCH.len() + HEX_PREFIX.len() + HEX_DIGITS;

/// Header format identifiers.
pub mod format_ids {
    pub const HEX_ASCII_V1: u16 = 0x0001;
    pub const BINARY_LE_V2: u16 = 0x0002;
}
