//! io.rs
//! File glue around the header encoder.
//!
//! Header and payload share the start of the same file, so the whole original
//! payload is read into memory before the header is written. Writing first
//! would overwrite the payload bytes the header now occupies.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::config::PatchConfig;
use crate::headers::{decode_header, EncodedHeader, HeaderFormat, PatchHeader};
use crate::report::PatchReport;
use crate::types::PatchError;
use crate::utils::hex_dump;

// ================= Header =================

/// Write `header` followed by `payload`.
pub fn write_patched<W: Write>(w: &mut W, header: &EncodedHeader, payload: &[u8]) -> Result<(), PatchError> {
    w.write_all(header.as_bytes())?;
    w.write_all(payload)?;
    Ok(())
}

/// Read exactly one header from `r` and decode it.
pub fn read_header<R: Read>(r: &mut R, format: HeaderFormat, header_size: i64) -> Result<PatchHeader, PatchError> {
    let len = format.header_len(header_size)?;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(decode_header(&buf, format, header_size)?)
}

// ================= Preparation =================

/// Prepend a header to the contents of `file`, in place.
///
/// Nothing is written if encoding fails. The capacity warning is logged, not
/// returned as an error; it is also available as `PatchReport::fits`.
pub fn prepend_header<F: Read + Write + Seek>(file: &mut F, cfg: &PatchConfig) -> Result<PatchReport, PatchError> {
    file.seek(SeekFrom::Start(0))?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;

    let payload_size = contents.len() as u64;
    let header = cfg.encode(payload_size)?;
    trace!("patch header:\n{}", hex_dump(header.as_bytes()));

    file.seek(SeekFrom::Start(0))?;
    write_patched(file, &header, &contents)?;
    file.flush()?;

    let report = PatchReport::new(&header, payload_size, cfg.max_partition_size);
    info!("{report}");
    if !report.fits {
        warn!(
            payload_size,
            header_size = report.header_size,
            max_partition_size = cfg.max_partition_size,
            "patch too large for patch partition"
        );
    }
    Ok(report)
}

/// Open an existing patch file for read/write and prepend its header.
pub fn prepare_patch_file<P: AsRef<Path>>(path: P, cfg: &PatchConfig) -> Result<PatchReport, PatchError> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?cfg, "preparing patch file");

    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    prepend_header(&mut file, cfg)
}

// ================= Image promotion =================

/// Synchronous yes/no decision, e.g. backed by a terminal prompt in a tool.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Replace the source image with the freshly flashed one, if confirmed.
///
/// Returns `true` when `source` was updated.
pub fn promote_image<P, Q, C>(flashed: P, source: Q, confirm: &mut C) -> Result<bool, PatchError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    C: Confirm + ?Sized,
{
    let (flashed, source) = (flashed.as_ref(), source.as_ref());
    let prompt = format!(
        "Set {} as source/currently running image {}?",
        flashed.display(),
        source.display()
    );

    if !confirm.confirm(&prompt) {
        info!("source is not updated");
        return Ok(false);
    }

    fs::copy(flashed, source)?;
    info!(source = %source.display(), "source updated");
    Ok(true)
}
