//! Shared data model (§3): shreds, file/tree records, cliques, and reports.
use std::collections::BTreeMap;

use crate::normalize::NormalizationSet;

/// Width (in bytes) of the default hash, MD5.
pub const HASH_WIDTH: usize = 16;

/// A strong hash of a shred's concatenated normalized text.
pub type Hash = [u8; HASH_WIDTH];

/// A single shred: a window of consecutive relevant lines in one file.
///
/// `start`/`end` are inclusive 1-origin line numbers in the *original*
/// file, so `end - start + 1` may exceed the shred size when ineligible
/// lines were skipped inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shred {
    pub start: usize,
    pub end: usize,
    pub hash: Hash,
}

/// All shreds produced for a single file by the shredder (C3).
#[derive(Debug, Clone)]
pub struct FileShreds {
    pub file_id: String,
    pub shreds: Vec<Shred>,
}

/// A location where a clique's matched text occurs: a file and a line range.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub file_id: String,
    pub start: usize,
    pub end: usize,
}

impl Location {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// The tree a location belongs to: the first `/`-separated segment of
    /// its `file_id`.
    pub fn tree_name(&self) -> &str {
        self.file_id.split('/').next().unwrap_or(&self.file_id)
    }

    pub fn overlaps(&self, other: &Location) -> bool {
        self.file_id == other.file_id && self.start <= other.end && other.start <= self.end
    }
}

/// A set of shred locations that share a hash (or, after coalescing, a
/// transitive overlap closure of such shreds).
#[derive(Debug, Clone, Default)]
pub struct Clique {
    pub locations: Vec<Location>,
}

impl Clique {
    pub fn new(locations: Vec<Location>) -> Self {
        Clique { locations }
    }

    /// A clique is cross-tree iff at least two distinct tree names appear
    /// among its locations.
    pub fn is_cross_tree(&self) -> bool {
        let mut trees = self.locations.iter().map(Location::tree_name);
        let Some(first) = trees.next() else {
            return false;
        };
        trees.any(|t| t != first)
    }

    /// The length (in lines) of the longest range in this clique.
    pub fn max_len(&self) -> usize {
        self.locations.iter().map(Location::len).max().unwrap_or(0)
    }
}

/// Per-tree bookkeeping (§3 Tree record).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TreeProperties {
    /// Number of files shredded from this tree.
    pub files: usize,
    /// Total lines shredded from this tree.
    pub lines: usize,
    /// Number of cliques touching this tree (recomputed by `preen`).
    pub matches: usize,
    /// Total lines of this tree covered by those cliques (by `preen`).
    pub matchlines: usize,
}

/// Header metadata shared by SHIF-A and SCF-B.
#[derive(Debug, Clone)]
pub struct Header {
    pub hash_method: String,
    pub shred_size: usize,
    pub normalization: NormalizationSet,
}

/// A full clique report (§3 Report): the *B* form produced by stage 3.
///
/// Invariant maintained by `preen`: `matches == Some(cliques.len())`, and
/// each tree's `matches`/`matchlines` equal the clique-derived totals.
#[derive(Debug, Clone)]
pub struct Report {
    pub header: Header,
    pub merge_program: Option<String>,
    pub filter_program: Option<String>,
    pub filtering: Option<String>,
    /// `Matches` header field, as declared/last preened. `None` only
    /// transiently before the first `preen()` call.
    pub matches: Option<usize>,
    /// Ordered `(tree_name, properties)` pairs — not a map, so
    /// serialization order is deterministic without an ancillary sort key.
    pub trees: Vec<(String, TreeProperties)>,
    /// `file_id -> line_count`, derived from the clique blocks as they are
    /// read (or from shred coverage as they are built); never stored
    /// independently of that evidence.
    pub files: BTreeMap<String, usize>,
    pub cliques: Vec<Clique>,
}

impl Report {
    /// Recompute `matches`/`matchlines` for every tree and the top-level
    /// `matches` count from the canonical clique list. Must be invoked
    /// before every `dump` (C9.preen, tested by the "preen invariant").
    pub fn preen(&mut self) {
        for (_, props) in &mut self.trees {
            props.matches = 0;
            props.matchlines = 0;
        }

        for clique in &self.cliques {
            // A clique may touch the same tree through multiple locations;
            // `matches` counts the clique once per tree it touches, and
            // `matchlines` sums the longest range witnessed in that tree.
            let mut per_tree_max: BTreeMap<&str, usize> = BTreeMap::new();
            for loc in &clique.locations {
                let entry = per_tree_max.entry(loc.tree_name()).or_insert(0);
                *entry = (*entry).max(loc.len());
            }
            for (tree, max_len) in per_tree_max {
                if let Some((_, props)) = self.trees.iter_mut().find(|(name, _)| name == tree) {
                    props.matches += 1;
                    props.matchlines += max_len;
                }
            }
        }

        self.matches = Some(self.cliques.len());
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
