/// Longest prefix `fmt_bytes` renders before eliding the rest.
const FMT_BYTES_LIMIT: usize = 16;

/// Render bytes for error messages: quoted ASCII when printable, hex otherwise.
///
/// Headers have no size cap, so anything past the first 16 bytes is elided
/// and reported as a trailing `... (+N bytes)` count.
pub fn fmt_bytes(b: &[u8]) -> String {
    let (shown, rest) = b.split_at(b.len().min(FMT_BYTES_LIMIT));
    let printable = shown.iter().all(|&c| c.is_ascii_graphic() || c == b' ');
    let mut out = if printable {
        format!("b\"{}\"", String::from_utf8_lossy(shown))
    } else {
        format!("0x{}", hex::encode(shown))
    };
    if !rest.is_empty() {
        out.push_str(&format!("... (+{} bytes)", rest.len()));
    }
    out
}

/// Offset-prefixed hex dump, 16 bytes per line.
pub fn hex_dump(b: &[u8]) -> String {
    b.chunks(16)
        .enumerate()
        .map(|(i, line)| {
            let bytes: Vec<String> = line.iter().map(|x| format!("{x:02x}")).collect();
            format!("{:04x}: {}", i * 16, bytes.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
