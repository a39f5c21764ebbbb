//! Report writer/reader (C7) — the *B* interchange format.
use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read, Write};

use regex::Regex;

use crate::error::Error;
use crate::model::{Clique, Header, Location, Report, TreeProperties};
use crate::normalize::NormalizationSet;

const MAGIC_PREFIX: &str = "#SCF-B ";
const CURRENT_VERSION: &str = "2.0";

/// Escape a `%`-prefixed content line so it cannot be mistaken for the
/// `%%` record-group terminator.
fn escape_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix('%') {
        format!("%%{rest}")
    } else {
        line.to_string()
    }
}

fn unescape_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("%%") {
        format!("%{rest}")
    } else {
        line.to_string()
    }
}

pub fn write(w: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(w, "{MAGIC_PREFIX}{CURRENT_VERSION}")?;
    writeln!(w, "Hash-Method: {}", report.header.hash_method)?;
    writeln!(w, "Normalization: {}", report.header.normalization)?;
    writeln!(w, "Shred-Size: {}", report.header.shred_size)?;
    writeln!(
        w,
        "Matches: {}",
        report.matches.unwrap_or(report.cliques.len())
    )?;
    if let Some(merge_program) = &report.merge_program {
        writeln!(w, "Merge-Program: {merge_program}")?;
    }
    if let Some(filter_program) = &report.filter_program {
        writeln!(w, "Filter-Program: {filter_program}")?;
    }
    if let Some(filtering) = &report.filtering {
        writeln!(w, "Filtering: {filtering}")?;
    }
    writeln!(w, "%%")?;

    let mut trees = report.trees.clone();
    trees.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, props) in &trees {
        writeln!(
            w,
            "{name}: files={}, lines={}, matches={}, matchlines={}",
            props.files, props.lines, props.matches, props.matchlines
        )?;
    }
    writeln!(w, "%%")?;

    for clique in &report.cliques {
        for loc in &clique.locations {
            let file_line_count = report.files.get(&loc.file_id).copied().unwrap_or(loc.end);
            writeln!(
                w,
                "{}",
                escape_line(&format!(
                    "{}:{}:{}:{}",
                    loc.file_id, loc.start, loc.end, file_line_count
                ))
            )?;
        }
        writeln!(w, "%%")?;
    }
    Ok(())
}

pub fn read(r: &mut impl Read) -> Result<Report, Error> {
    let mut reader = BufReader::new(r);

    let mut magic = String::new();
    reader.read_line(&mut magic)?;
    let magic = magic.trim_end_matches(['\n', '\r']);
    if !magic.starts_with(MAGIC_PREFIX) {
        return Err(Error::MalformedInput(format!(
            "expected {MAGIC_PREFIX:?} magic line, got {magic:?}"
        )));
    }

    let mut hash_method = None;
    let mut normalization = None;
    let mut shred_size = None;
    let mut declared_matches = None;
    let mut merge_program = None;
    let mut filter_program = None;
    let mut filtering = None;

    loop {
        let line = read_required_line(&mut reader, "header")?;
        if line == "%%" {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(Error::MalformedInput(format!(
                "header line missing ':': {line:?}"
            )));
        };
        let value = value.trim();
        match key {
            "Hash-Method" => hash_method = Some(value.to_string()),
            "Normalization" => normalization = Some(NormalizationSet::parse(value)?),
            "Shred-Size" => {
                shred_size = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| Error::MalformedInput(format!("bad Shred-Size {value:?}")))?,
                )
            }
            "Matches" => {
                declared_matches = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| Error::MalformedInput(format!("bad Matches {value:?}")))?,
                )
            }
            "Merge-Program" => merge_program = Some(value.to_string()),
            "Filter-Program" => filter_program = Some(value.to_string()),
            "Filtering" => filtering = Some(value.to_string()),
            other => {
                return Err(Error::MalformedInput(format!(
                    "unknown SCF-B header key {other:?}"
                )));
            }
        }
    }

    let header = Header {
        hash_method: hash_method
            .ok_or_else(|| Error::MalformedInput("missing Hash-Method".to_string()))?,
        shred_size: shred_size
            .ok_or_else(|| Error::MalformedInput("missing Shred-Size".to_string()))?,
        normalization: normalization
            .ok_or_else(|| Error::MalformedInput("missing Normalization".to_string()))?,
    };

    let mut trees = Vec::new();
    loop {
        let line = read_required_line(&mut reader, "tree properties")?;
        if line == "%%" {
            break;
        }
        let Some((name, rest)) = line.split_once(':') else {
            return Err(Error::MalformedInput(format!(
                "tree-properties line missing ':': {line:?}"
            )));
        };
        let mut kv: BTreeMap<&str, usize> = BTreeMap::new();
        for pair in rest.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some((k, v)) = pair.split_once('=') else {
                return Err(Error::MalformedInput(format!(
                    "bad tree-properties pair {pair:?}"
                )));
            };
            let v = v
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::MalformedInput(format!("bad tree-properties value {v:?}")))?;
            kv.insert(k.trim(), v);
        }
        trees.push((
            name.trim().to_string(),
            TreeProperties {
                files: kv.get("files").copied().unwrap_or(0),
                lines: kv.get("lines").copied().unwrap_or(0),
                matches: kv.get("matches").copied().unwrap_or(0),
                matchlines: kv.get("matchlines").copied().unwrap_or(0),
            },
        ));
    }

    let record_re = Regex::new(r"^(.*):([0-9]+):([0-9]+):([0-9]+)$").unwrap();
    let mut cliques = Vec::new();
    let mut files: BTreeMap<String, usize> = BTreeMap::new();
    loop {
        let mut block_locations = Vec::new();
        let mut saw_terminator = false;
        loop {
            let mut raw = String::new();
            let n = reader.read_line(&mut raw)?;
            if n == 0 {
                break;
            }
            let raw = raw.trim_end_matches(['\n', '\r']);
            if raw == "%%" {
                saw_terminator = true;
                break;
            }
            let line = unescape_line(raw);
            let caps = record_re.captures(&line).ok_or_else(|| {
                Error::MalformedInput(format!("clique record does not match grammar: {line:?}"))
            })?;
            let file_id = caps[1].to_string();
            let start = caps[2].parse::<usize>().unwrap();
            let end = caps[3].parse::<usize>().unwrap();
            let file_line_count = caps[4].parse::<usize>().unwrap();
            files
                .entry(file_id.clone())
                .and_modify(|v| *v = (*v).max(file_line_count))
                .or_insert(file_line_count);
            block_locations.push(Location {
                file_id,
                start,
                end,
            });
        }
        if block_locations.is_empty() {
            break;
        }
        if !saw_terminator {
            return Err(Error::MalformedInput(
                "clique block missing %% terminator".to_string(),
            ));
        }
        cliques.push(Clique::new(block_locations));
    }

    if let Some(declared) = declared_matches
        && declared != cliques.len()
    {
        return Err(Error::MatchesMismatch {
            declared,
            observed: cliques.len(),
        });
    }

    let mut report = Report {
        header,
        merge_program,
        filter_program,
        filtering,
        matches: declared_matches,
        trees,
        files,
        cliques,
    };
    report.preen();
    Ok(report)
}

fn read_required_line(reader: &mut impl BufRead, context: &str) -> Result<String, Error> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Err(Error::MalformedInput(format!(
            "unexpected EOF reading SCF-B {context}"
        )));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
#[path = "scf_b_test.rs"]
mod tests;
