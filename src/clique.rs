//! Clique builder (C5): turn two or more *A* streams into a clique list.
use std::collections::BTreeMap;

use crate::error::Error;
use crate::model::{Clique, Header, Location, TreeProperties};
use crate::reporter::Reporter;
use crate::shif_a::ShifADocument;

/// Build a clique report's raw ingredients from a set of compatible *A*
/// streams: the per-tree file/line bookkeeping, the `file_id -> line_count`
/// map, and the surviving cliques (not yet coalesced).
#[derive(Debug)]
pub struct IngestResult {
    pub header: Header,
    pub trees: Vec<(String, TreeProperties)>,
    pub files: BTreeMap<String, usize>,
    pub cliques: Vec<Clique>,
}

/// Check that every document shares the same normalization set, shred
/// size, and hash method. Returns the common header, or `Incompatible`.
fn check_compatible(docs: &[ShifADocument]) -> Result<Header, Error> {
    let first = docs
        .first()
        .ok_or_else(|| Error::Incompatible("no input streams given".to_string()))?;
    for doc in &docs[1..] {
        if doc.header.normalization != first.header.normalization {
            return Err(Error::Incompatible(format!(
                "normalization mismatch: {} vs {}",
                doc.header.normalization, first.header.normalization
            )));
        }
        if doc.header.shred_size != first.header.shred_size {
            return Err(Error::Incompatible(format!(
                "shred-size mismatch: {} vs {}",
                doc.header.shred_size, first.header.shred_size
            )));
        }
        if doc.header.hash_method != first.header.hash_method {
            return Err(Error::Incompatible(format!(
                "hash-method mismatch: {} vs {}",
                doc.header.hash_method, first.header.hash_method
            )));
        }
    }
    Ok(first.header.clone())
}

/// Ingest `docs` (already read *A* streams, at least one per tree) into a
/// clique list. `cross_tree_only` drops any clique whose locations all
/// share a single tree name (§4.5, step 2).
pub fn build_cliques(
    docs: &[ShifADocument],
    cross_tree_only: bool,
    reporter: &mut Reporter,
) -> Result<IngestResult, Error> {
    let header = check_compatible(docs)?;

    let mut by_hash: BTreeMap<[u8; 16], Vec<Location>> = BTreeMap::new();
    let mut files: BTreeMap<String, usize> = BTreeMap::new();
    let mut tree_files: BTreeMap<String, usize> = BTreeMap::new();
    let mut tree_lines: BTreeMap<String, usize> = BTreeMap::new();

    for doc in docs {
        for file in &doc.files {
            let tree_name = file
                .file_id
                .split('/')
                .next()
                .unwrap_or(&file.file_id)
                .to_string();
            *tree_files.entry(tree_name.clone()).or_insert(0) += 1;

            let max_end = file.shreds.iter().map(|s| s.end).max().unwrap_or(0);
            let entry = files.entry(file.file_id.clone()).or_insert(0);
            *entry = (*entry).max(max_end);
            *tree_lines.entry(tree_name).or_insert(0) += max_end;

            for shred in &file.shreds {
                by_hash.entry(shred.hash).or_default().push(Location {
                    file_id: file.file_id.clone(),
                    start: shred.start,
                    end: shred.end,
                });
            }
        }
    }

    let mut cliques = Vec::new();
    for (_, mut locations) in by_hash {
        reporter.tick_hash_class();
        if locations.len() < 2 {
            continue;
        }
        locations.sort();
        locations.dedup();
        if locations.len() < 2 {
            continue;
        }
        let clique = Clique::new(locations);
        if cross_tree_only && !clique.is_cross_tree() {
            continue;
        }
        cliques.push(clique);
    }

    let tree_names: Vec<String> = tree_files.keys().cloned().collect();
    let trees = tree_names
        .into_iter()
        .map(|name| {
            let props = TreeProperties {
                files: tree_files.get(&name).copied().unwrap_or(0),
                lines: tree_lines.get(&name).copied().unwrap_or(0),
                matches: 0,
                matchlines: 0,
            };
            (name, props)
        })
        .collect();

    Ok(IngestResult {
        header,
        trees,
        files,
        cliques,
    })
}

#[cfg(test)]
#[path = "clique_test.rs"]
mod tests;
