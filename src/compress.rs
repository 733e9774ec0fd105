// compress.rs

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::codec::{self, HuffmanCoder};
use crate::codes::CodeTable;
use crate::container::Container;
use crate::error::Result;
use crate::report::{Action, Report};

/// Result of compressing one file.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub report: Report,
    pub table: CodeTable,
}

/// Encode `data` into a complete container.
pub fn compress_bytes(data: &[u8]) -> Result<(Vec<u8>, CodeTable)> {
    let encoded = codec::encode(data)?;
    let container = Container::from_encoded(&encoded)?;
    Ok((container.to_bytes()?, encoded.table))
}

/// Inverse of `compress_bytes`.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let container = Container::read_from(&mut Cursor::new(data))?;
    let bits = container.unpack_bits()?;
    debug!(
        tree_bytes = container.tree.len(),
        packed_bytes = container.packed.len(),
        bits = container.bit_count,
        "read container"
    );
    HuffmanCoder::new().decode(&bits, Some(container.tree.as_slice()))
}

pub fn compress_file(input: &Path, output: &Path) -> Result<Compressed> {
    let data = fs::read(input)?;
    let (compressed, table) = compress_bytes(&data)?;
    write_atomic(output, &compressed)?;

    let report = Report::new(
        Action::Compress,
        input,
        output,
        data.len() as u64,
        compressed.len() as u64,
    );
    info!(
        input = %input.display(),
        output = %output.display(),
        original = report.original_size,
        compressed = report.compressed_size,
        "compressed file"
    );
    Ok(Compressed { report, table })
}

pub fn decompress_file(input: &Path, output: &Path) -> Result<Report> {
    let data = fs::read(input)?;
    let decompressed = decompress_bytes(&data)?;
    write_atomic(output, &decompressed)?;

    let report = Report::new(
        Action::Decompress,
        input,
        output,
        decompressed.len() as u64,
        data.len() as u64,
    );
    info!(
        input = %input.display(),
        output = %output.display(),
        restored = report.original_size,
        "decompressed file"
    );
    Ok(report)
}

// Write to a uniquely named temp file in the destination directory, then
// rename it over `path`, so a failure never leaves a partial `path` behind.
// The temp file is removed on drop if anything fails first.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuffmanError;

    #[test]
    fn bytes_round_trip() {
        let data = b"It was the best of times, it was the worst of times";
        let (compressed, table) = compress_bytes(data).unwrap();
        assert!(!table.is_empty());
        assert_eq!(decompress_bytes(&compressed).unwrap(), data);
    }

    #[test]
    fn empty_bytes_round_trip() {
        let (compressed, table) = compress_bytes(b"").unwrap();
        assert!(table.is_empty());
        assert_eq!(decompress_bytes(&compressed).unwrap(), b"");
    }

    #[test]
    fn corrupt_tree_is_reported() {
        let (mut compressed, _) = compress_bytes(b"abcabcabd").unwrap();
        // first tree token sits right after the tree length
        compressed[8] = b'x';
        let err = decompress_bytes(&compressed).unwrap_err();
        assert!(err.is_corrupt());
        assert!(matches!(err, HuffmanError::InvalidToken { token: b'x', offset: 0 }));
    }

    #[test]
    fn garbage_after_container_is_reported() {
        let (mut compressed, _) = compress_bytes(b"hello world").unwrap();
        compressed.extend_from_slice(b"GARBAGE");
        let err = decompress_bytes(&compressed).unwrap_err();
        assert!(err.is_corrupt());
        assert!(matches!(err, HuffmanError::TrailingContainerBytes));
    }

    #[test]
    fn atomic_write_leaves_neighbouring_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.huf");
        let neighbour = dir.path().join("out.huf.tmp");
        fs::write(&neighbour, b"keep me").unwrap();

        write_atomic(&target, b"payload").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"payload");
        assert_eq!(fs::read(&neighbour).unwrap(), b"keep me");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        fs::write(&target, b"old contents that are longer").unwrap();

        write_atomic(&target, b"new").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }
}
