//! Streaming line counter.
//!
//! Lines are delimited by `\n` only. A final line without a trailing
//! newline still counts; `\r` is never a boundary on its own. Files are read
//! through a fixed-size buffer and never loaded whole.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Line delimiter.
pub const NEWLINE: u8 = b'\n';

/// Size of the read buffer used while counting.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Count the lines in a file.
///
/// # Example
///
/// ```rust
/// use repostatslib::count_lines;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("notes.txt");
/// fs::write(&path, "hello\nworld").unwrap();
///
/// assert_eq!(count_lines(&path).unwrap(), 2);
/// ```
pub fn count_lines(path: impl AsRef<Path>) -> io::Result<u64> {
    let file = File::open(path.as_ref())?;
    count_lines_in(file)
}

/// Count the lines in any byte stream.
///
/// A read error aborts the count; no partial result is returned.
pub fn count_lines_in<R: Read>(mut reader: R) -> io::Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut lines: u64 = 0;
    let mut last_byte: Option<u8> = None;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buf[..n];
        lines += bytecount::count(chunk, NEWLINE) as u64;
        last_byte = chunk.last().copied();
    }

    match last_byte {
        Some(NEWLINE) | None => Ok(lines),
        Some(_) => Ok(lines + 1),
    }
}
