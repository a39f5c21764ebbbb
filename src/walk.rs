//! Filesystem walking (C10), grounded on the `.gitignore`-aware traversal
//! style used elsewhere in this codebase's lineage: `ignore::WalkBuilder`,
//! `.git` always skipped, deterministic `file_id` ordering.
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::eligibility::is_eligible_file;
use crate::error::Error;

/// A single eligible file discovered under a tree root.
#[derive(Debug, Clone)]
pub struct TreeFile {
    /// `{tree_name}/{relative_path}`, `/`-separated regardless of host
    /// path separator, so SHIF-A/SCF-B output is platform-independent.
    pub file_id: String,
    pub absolute_path: PathBuf,
}

/// Walks one tree root, deriving `tree_name` from the root's final path
/// component (after canonicalization) unless an override is supplied.
pub struct TreeWalker {
    pub tree_name: String,
    root: PathBuf,
    c_only: bool,
}

impl TreeWalker {
    pub fn new(
        root: &Path,
        c_only: bool,
        tree_name_override: Option<String>,
    ) -> Result<Self, Error> {
        let canonical = root.canonicalize()?;
        let tree_name = match tree_name_override {
            Some(name) => name,
            None => canonical
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::MalformedInput(format!(
                        "cannot derive a tree name from {}",
                        canonical.display()
                    ))
                })?,
        };
        Ok(TreeWalker {
            tree_name,
            root: canonical,
            c_only,
        })
    }

    /// Enumerate eligible files, sorted by `file_id` for determinism.
    pub fn files(&self) -> Result<Vec<TreeFile>, Error> {
        let mut result = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .follow_links(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => return Err(Error::Io(io_from_walk(err))),
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let absolute_path = entry.path().to_path_buf();
            if !is_eligible_file(&absolute_path, self.c_only)? {
                continue;
            }
            let relative = absolute_path
                .strip_prefix(&self.root)
                .unwrap_or(&absolute_path);
            let relative_str = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let file_id = format!("{}/{}", self.tree_name, relative_str);
            result.push(TreeFile {
                file_id,
                absolute_path,
            });
        }
        result.sort_by(|a, b| a.file_id.cmp(&b.file_id));
        Ok(result)
    }
}

fn io_from_walk(err: ignore::Error) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
