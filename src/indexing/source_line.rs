//! Best-effort retrieval of a single source line.
//!
//! The resolved bytes become the tag's literal search pattern. A missing
//! pattern only degrades the tag's usefulness, so every failure mode here
//! resolves to an empty byte sequence instead of an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Return the raw bytes of the 1-based `line` of `path`, with the trailing
/// line terminator stripped.
///
/// Returns an empty sequence when the file cannot be opened, an I/O error
/// occurs mid-scan, or the file has fewer lines than requested. The final
/// line of a file without a trailing terminator resolves to its full
/// content.
pub fn content_of_line(path: &Path, line: u32) -> Vec<u8> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return Vec::new(),
    };
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut current = 1u32;

    loop {
        buf.clear();
        let read = match reader.read_until(b'\n', &mut buf) {
            Ok(read) => read,
            Err(_) => return Vec::new(),
        };
        if read == 0 {
            // End of input before reaching the requested line.
            return Vec::new();
        }
        if current == line {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            return buf;
        }
        current += 1;
    }
}
