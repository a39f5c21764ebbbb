//! Shredder (C3): turn an eligible file into a sequence of
//! `(start, end, hash)` shreds over its relevant lines.
use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;

use crate::cancel::CancelToken;
use crate::eligibility::normalize_and_filter;
use crate::error::Error;
use crate::model::{FileShreds, Hash, Shred};
use crate::normalize::NormalizationSet;
use crate::reporter::Reporter;
use crate::walk::TreeFile;

/// MD5 of the concatenation of the window's normalized texts, in order,
/// with no separator — matching `H(D[0] ∥ D[1] ∥ … ∥ D[N-1])`.
fn hash_window<'a>(lines: impl Iterator<Item = &'a str>) -> Hash {
    let mut buf = String::new();
    for line in lines {
        buf.push_str(line);
    }
    md5::compute(buf.as_bytes()).0
}

/// Shred a single file: a rolling window over its relevant lines only.
pub fn shred_file(
    path: &Path,
    shred_size: usize,
    normalization: &NormalizationSet,
) -> Result<Vec<Shred>, Error> {
    assert!(shred_size >= 1, "shred_size must be at least 1");

    let content = std::fs::read_to_string(path)?;
    let normalized_content = content.replace("\r\n", "\n");

    let mut window: VecDeque<(usize, String)> = VecDeque::with_capacity(shred_size);
    let mut shreds = Vec::new();
    let mut linecount = 0usize;
    let mut relevant_seen = 0usize;

    for line in normalized_content.lines() {
        linecount += 1;
        let Some(normalized) = normalize_and_filter(line, normalization) else {
            continue;
        };
        relevant_seen += 1;
        window.push_back((linecount, normalized));

        if window.len() == shred_size {
            let start = window[0].0;
            let hash = hash_window(window.iter().map(|(_, t)| t.as_str()));
            shreds.push(Shred {
                start,
                end: linecount,
                hash,
            });
            window.pop_front();
        }
    }

    // At most one short terminal shred, only when the file never reached a
    // full window and at least one relevant line exists.
    if relevant_seen > 0 && relevant_seen < shred_size {
        let start = window.front().unwrap().0;
        let end = window.back().unwrap().0;
        let hash = hash_window(window.iter().map(|(_, t)| t.as_str()));
        shreds.push(Shred { start, end, hash });
    }

    Ok(shreds)
}

/// Shred every file in `files` sequentially, ticking `reporter` once per
/// file and honoring `cancel` between files. Returns `None` if cancelled.
pub fn shred_files(
    files: &[TreeFile],
    shred_size: usize,
    normalization: &NormalizationSet,
    reporter: &mut Reporter,
    cancel: &CancelToken,
) -> Result<Option<Vec<FileShreds>>, Error> {
    let mut result = Vec::with_capacity(files.len());
    for file in files {
        if cancel.is_cancelled() {
            return Ok(None);
        }
        let shreds = shred_file(&file.absolute_path, shred_size, normalization)?;
        reporter.tick_file();
        result.push(FileShreds {
            file_id: file.file_id.clone(),
            shreds,
        });
    }
    Ok(Some(result))
}

/// Shred every file in `files` using a bounded pool of `threads` worker
/// threads (§5: "shredding is embarrassingly parallel per file"). Results
/// are collected by file index and returned in the original, deterministic
/// `files` order regardless of completion order — the *A* format is
/// per-file blocked, so output order must not depend on scheduling.
pub fn shred_files_parallel(
    files: &[TreeFile],
    shred_size: usize,
    normalization: &NormalizationSet,
    reporter: &mut Reporter,
    cancel: &CancelToken,
    threads: usize,
) -> Result<Option<Vec<FileShreds>>, Error> {
    if threads <= 1 || files.len() <= 1 {
        return shred_files(files, shred_size, normalization, reporter, cancel);
    }

    let (tx, rx) = mpsc::channel::<(usize, Result<Vec<Shred>, Error>)>();
    std::thread::scope(|scope| {
        let chunk_size = files.len().div_ceil(threads).max(1);
        for (chunk_start, chunk) in files.chunks(chunk_size).enumerate() {
            let tx = tx.clone();
            let base = chunk_start * chunk_size;
            let cancel = cancel.clone();
            scope.spawn(move || {
                for (offset, file) in chunk.iter().enumerate() {
                    if cancel.is_cancelled() {
                        return;
                    }
                    let result = shred_file(&file.absolute_path, shred_size, normalization);
                    if tx.send((base + offset, result)).is_err() {
                        return;
                    }
                }
            });
        }
        drop(tx);

        let mut slots: Vec<Option<Vec<Shred>>> = (0..files.len()).map(|_| None).collect();
        for (index, result) in rx {
            let shreds = result?;
            slots[index] = Some(shreds);
        }
        if cancel.is_cancelled() {
            return Ok(None);
        }
        let result = files
            .iter()
            .zip(slots)
            .map(|(file, shreds)| {
                reporter.tick_file();
                FileShreds {
                    file_id: file.file_id.clone(),
                    shreds: shreds.expect("every file index is sent exactly once"),
                }
            })
            .collect();
        Ok(Some(result))
    })
}

#[cfg(test)]
#[path = "shred_test.rs"]
mod tests;
