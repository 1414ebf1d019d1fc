//! patch-core
//!
//! Patch header encoding for a flash loader: prepends `"NEWP"` + payload size
//! to a patch so the loader can find and size it without external metadata.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod config;
pub mod headers;
pub mod io;
pub mod report;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::PatchConfig;
    pub use crate::headers::{
        decode_header, encode_header, encode_header_with, inspect_header, mark_applied,
        EncodedHeader, HeaderError, HeaderFormat, HeaderState, PatchHeader,
    };
    pub use crate::io::{prepare_patch_file, prepend_header, promote_image, Confirm};
    pub use crate::report::PatchReport;
    pub use crate::types::PatchError;
}
