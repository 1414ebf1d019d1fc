//! report.rs
//! Summary of one patch preparation run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::headers::{EncodedHeader, HeaderFormat};
use crate::types::PatchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    pub format: HeaderFormat,
    pub payload_size: u64,
    pub header_size: usize,
    pub max_partition_size: u64,
    pub fits: bool,
}

impl PatchReport {
    pub fn new(header: &EncodedHeader, payload_size: u64, max_partition_size: u64) -> Self {
        Self {
            format: header.format,
            payload_size,
            header_size: header.header_size(),
            max_partition_size,
            fits: header.fits,
        }
    }

    /// Bytes occupied in the partition: header + payload.
    pub fn total_size(&self) -> u64 {
        self.header_size as u64 + self.payload_size
    }

    pub fn to_json(&self) -> Result<String, PatchError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Patch size: {:#x} + {:#x} (header)", self.payload_size, self.header_size)
    }
}
