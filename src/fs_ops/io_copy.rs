//! Streaming copy with durability.
//!
//! - Writes to a newly created destination file (create_new; never clobbers).
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//! - Fsyncs the destination before returning, so the later size check reads
//!   what actually reached the disk.
//!
//! Snapshot semantics: the source file is read once from start to EOF; if it
//! grows concurrently the extra bytes are not included, and the caller's size
//! verification will reject the copy.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy `src` -> `dst` using buffered I/O, then fsync the destination.
/// Returns the number of bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;

    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write as _;
    use tempfile::tempdir;

    #[test]
    fn copy_small_file_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src.txt");
        let dst_path = dir.path().join("dst.txt");

        let data = b"hello world";
        fs::write(&src_path, data).unwrap();

        let n = copy_streaming(&src_path, &dst_path).unwrap();
        assert_eq!(n, data.len() as u64);

        let got = fs::read(&dst_path).unwrap();
        assert_eq!(&got, data);
    }

    #[test]
    fn copy_zero_length_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("empty");
        let dst_path = dir.path().join("out");
        File::create(&src_path).unwrap(); // empty file

        let n = copy_streaming(&src_path, &dst_path).unwrap();
        assert_eq!(n, 0);
        let meta = fs::metadata(&dst_path).unwrap();
        assert_eq!(meta.len(), 0);
    }

    #[test]
    fn fails_if_dest_exists() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src");
        let dst_path = dir.path().join("dst");
        fs::write(&src_path, b"data").unwrap();
        // Pre-create destination
        let mut f = File::create(&dst_path).unwrap();
        f.write_all(b"x").unwrap();
        drop(f);

        let err = copy_streaming(&src_path, &dst_path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn large_file_copy_boundary() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.bin");
        let dst = dir.path().join("big.out");

        // Size > 2 * BUF_SIZE + 123 to cross multiple buffer boundaries
        let size = 2 * BUF_SIZE + 123;
        let mut data = vec![0u8; size];
        for (i, b) in data.iter_mut().enumerate() {
            *b = (i % 251) as u8; // pseudo pattern
        }
        fs::write(&src, &data).unwrap();

        let n = copy_streaming(&src, &dst).unwrap();
        assert_eq!(n as usize, size);

        let out = fs::read(&dst).unwrap();
        assert_eq!(out, data);
    }
}
