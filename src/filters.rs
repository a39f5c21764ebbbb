//! Report filters (C9): each mutates a report's clique list in place and
//! repairs tree bookkeeping via `Report::preen`.
use std::path::Path;

use regex::Regex;

use crate::error::Error;
use crate::model::{Location, Report};
use crate::triviality::{detect_language, is_significant};

/// Keep a clique iff any of its ranges spans at least `min` lines.
pub fn filter_by_size(report: &mut Report, min: usize) {
    report
        .cliques
        .retain(|clique| clique.locations.iter().any(|loc| loc.len() >= min));
    report.preen();
}

/// Keep a clique iff any of its locations' `file_id` matches `pattern`.
pub fn filter_by_filename(report: &mut Report, pattern: &Regex) {
    report.cliques.retain(|clique| {
        clique
            .locations
            .iter()
            .any(|loc| pattern.is_match(&loc.file_id))
    });
    report.preen();
}

/// Keep a clique iff the triviality classifier (C8) deems its extracted
/// text significant. Text is read from one representative location under
/// `base_dir`.
pub fn filter_by_significance(report: &mut Report, base_dir: &Path) -> Result<(), Error> {
    let mut keep = Vec::with_capacity(report.cliques.len());
    for clique in std::mem::take(&mut report.cliques) {
        let loc = clique
            .locations
            .first()
            .expect("cliques always carry at least one location");
        let text = extract_text(base_dir, loc)?;
        let first_line = text.lines().next().unwrap_or("");
        let language = detect_language(&loc.file_id, first_line);
        if is_significant(&text, language) {
            keep.push(clique);
        }
    }
    report.cliques = keep;
    report.preen();
    Ok(())
}

/// Extract a clique location's matched text: open its file under
/// `base_dir`, read through `start`, return `[start..end]` with any
/// leading `%` escaped to `%%`. Restores the process working directory on
/// every exit path.
pub fn extract_text(base_dir: &Path, location: &Location) -> Result<String, Error> {
    let original = std::env::current_dir()?;
    let result = (|| -> Result<String, Error> {
        std::env::set_current_dir(base_dir)?;
        let content = std::fs::read_to_string(&location.file_id)
            .map_err(|_| Error::MissingFile(location.file_id.clone()))?;
        let mut lines = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let lineno = index + 1;
            if lineno < location.start {
                continue;
            }
            if lineno > location.end {
                break;
            }
            lines.push(escape_percent(line));
        }
        Ok(lines.join("\n"))
    })();
    std::env::set_current_dir(&original)?;
    result
}

fn escape_percent(line: &str) -> String {
    if line.starts_with('%') {
        format!("%{line}")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
