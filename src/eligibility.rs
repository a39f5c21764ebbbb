//! Line and file eligibility (C2).
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::normalize::NormalizationSet;

/// A line is relevant iff its normalized form is non-empty.
pub fn is_relevant(normalized: &str) -> bool {
    !normalized.is_empty()
}

pub fn normalize_and_filter(line: &str, normalization: &NormalizationSet) -> Option<String> {
    let normalized = normalization.apply(line);
    if is_relevant(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

/// Extensions accepted in C-only mode (`-c`).
pub const C_ONLY_EXTENSIONS: &[&str] = &["c", "h", "txt"];

/// Is `path`'s extension one accepted by C-only mode?
pub fn has_c_only_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            C_ONLY_EXTENSIONS
                .iter()
                .any(|c| c.eq_ignore_ascii_case(ext))
        })
}

/// Check whether a reader points to a binary file by looking for a null
/// byte in the first 512 bytes. Resets the reader position to the start.
pub fn is_binary_reader<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; 512];
    let n = reader.read(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(header[..n].contains(&0))
}

/// Is `path` eligible for shredding? Positive size, not binary, and (when
/// `c_only`) one of `.c`/`.h`/`.txt`. Returns `Ok(false)` for zero-length
/// or binary files rather than treating them as errors.
pub fn is_eligible_file(path: &Path, c_only: bool) -> io::Result<bool> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Ok(false);
    }
    if c_only && !has_c_only_extension(path) {
        return Ok(false);
    }
    let mut file = std::fs::File::open(path)?;
    if is_binary_reader(&mut file)? {
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
#[path = "eligibility_test.rs"]
mod tests;
