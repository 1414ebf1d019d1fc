// File glue: read-before-write preparation, header readback, image promotion.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{Cursor, Read, Seek, SeekFrom, Write};

    use patch_core::config::PatchConfig;
    use patch_core::headers::{encode_header, HeaderError, HeaderFormat};
    use patch_core::io::{prepare_patch_file, prepend_header, promote_image, read_header, write_patched};
    use patch_core::types::PatchError;

    fn config(header_size: i64, max: u64) -> PatchConfig {
        PatchConfig::new(max).with_header_size(header_size)
    }

// ## 1. In-memory files

    #[test]
    fn prepends_without_clobbering_payload() {
        let mut file = Cursor::new(b"payload".to_vec());
        let report = prepend_header(&mut file, &config(8, 1024)).unwrap();

        assert_eq!(file.get_ref().as_slice(), b"NEWP\x07\x00\x00\x00payload");
        assert_eq!(report.payload_size, 7);
        assert_eq!(report.header_size, 8);
        assert_eq!(report.total_size(), 15);
        assert!(report.fits);
    }

    #[test]
    fn reads_whole_file_regardless_of_position() {
        let mut file = Cursor::new(b"0123456789".to_vec());
        file.seek(SeekFrom::End(0)).unwrap();
        let report = prepend_header(&mut file, &config(0, 1024)).unwrap();
        assert_eq!(report.payload_size, 10);
        assert_eq!(&file.get_ref()[8..], b"0123456789");
    }

    #[test]
    fn failed_encoding_leaves_file_untouched() {
        let mut file = Cursor::new(b"payload".to_vec());
        let err = prepend_header(&mut file, &config(-1, 1024)).unwrap_err();
        match err {
            PatchError::Header(HeaderError::InvalidHeaderSize { requested: -1 }) => {}
            _ => panic!("unexpected error: {err:?}"),
        }
        assert_eq!(file.get_ref().as_slice(), b"payload");
    }

    #[test]
    fn oversized_partition_still_writes_header() {
        let mut file = Cursor::new(vec![0xAB; 100]);
        let report = prepend_header(&mut file, &config(8, 100)).unwrap();
        assert!(!report.fits);
        assert_eq!(file.get_ref().len(), 108);
        assert_eq!(&file.get_ref()[..4], b"NEWP");
    }

    #[test]
    fn legacy_format_from_config() {
        let cfg = PatchConfig::new(0x20000).with_format(HeaderFormat::HexAsciiV1);
        let mut file = Cursor::new(vec![0u8; 0x100]);
        prepend_header(&mut file, &cfg).unwrap();
        assert_eq!(&file.get_ref()[..24], b"NEWPATCH0x00000000000100");
        assert_eq!(file.get_ref().len(), 24 + 0x100);
    }

    #[test]
    fn write_then_read_header() {
        let header = encode_header(3, 12, 64).unwrap();
        let mut out = Vec::new();
        write_patched(&mut out, &header, b"xyz").unwrap();
        assert_eq!(out.len(), 15);

        let mut r = Cursor::new(out);
        let decoded = read_header(&mut r, HeaderFormat::BinaryLeV2, 12).unwrap();
        assert_eq!(decoded.payload_size, 3);

        let mut rest = Vec::new();
        r.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"xyz");
    }

    #[test]
    fn read_header_short_input_is_io_error() {
        let mut r = Cursor::new(b"NEWP".to_vec());
        let err = read_header(&mut r, HeaderFormat::BinaryLeV2, 8).unwrap_err();
        assert!(matches!(err, PatchError::Io(_)));
    }

// ## 2. On-disk files

    #[test]
    fn prepares_file_on_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"\x01\x02\x03\x04\x05").unwrap();
        tmp.flush().unwrap();

        let report = prepare_patch_file(tmp.path(), &config(0x18, 0x1000)).unwrap();
        assert_eq!(report.header_size, 0x18);

        let bytes = fs::read(tmp.path()).unwrap();
        assert_eq!(bytes.len(), 0x18 + 5);
        assert_eq!(&bytes[..4], b"NEWP");
        assert_eq!(&bytes[4..8], &[5, 0, 0, 0]);
        assert!(bytes[8..0x18].iter().all(|&b| b == 0));
        assert_eq!(&bytes[0x18..], b"\x01\x02\x03\x04\x05");
    }

    #[test]
    fn missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.bin");
        let err = prepare_patch_file(&path, &config(8, 1024)).unwrap_err();
        assert!(matches!(err, PatchError::Io(_)));
        assert!(!path.exists());
    }

// ## 3. Image promotion

    #[test]
    fn promote_copies_only_when_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let flashed = dir.path().join("flashed.bin");
        let source = dir.path().join("source.bin");
        fs::write(&flashed, b"new image").unwrap();
        fs::write(&source, b"old image").unwrap();

        let mut prompts = Vec::new();
        let mut decline = |p: &str| {
            prompts.push(p.to_string());
            false
        };
        assert!(!promote_image(&flashed, &source, &mut decline).unwrap());
        assert_eq!(fs::read(&source).unwrap(), b"old image");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("flashed.bin"));

        let mut accept = |_: &str| true;
        assert!(promote_image(&flashed, &source, &mut accept).unwrap());
        assert_eq!(fs::read(&source).unwrap(), b"new image");
    }

    #[test]
    fn promote_missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut accept = |_: &str| true;
        let err = promote_image(dir.path().join("nope"), dir.path().join("source"), &mut accept).unwrap_err();
        assert!(matches!(err, PatchError::Io(_)));
    }
}
