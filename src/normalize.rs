//! Line normalization (C1).
//!
//! Recognized normalizations are a closed set so the header parser (C4/C7)
//! and the CLI share one source of truth instead of ad-hoc string matching.
use std::fmt;

use crate::error::Error;

/// A single recognized pre-hash text transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Normalization {
    /// Identity transform.
    None,
    /// Collapse every maximal run of space/tab/newline to a single space;
    /// strip leading/trailing spaces.
    RemoveWhitespace,
}

impl Normalization {
    fn name(self) -> &'static str {
        match self {
            Normalization::None => "none",
            Normalization::RemoveWhitespace => "remove_whitespace",
        }
    }

    fn parse_one(s: &str) -> Result<Self, Error> {
        match s {
            "none" => Ok(Normalization::None),
            "remove_whitespace" => Ok(Normalization::RemoveWhitespace),
            other => Err(Error::MalformedInput(format!(
                "unknown normalization {other:?}"
            ))),
        }
    }

    /// Apply this transform to a single line.
    pub fn apply(self, line: &str) -> String {
        match self {
            Normalization::None => line.to_string(),
            Normalization::RemoveWhitespace => {
                let collapsed: String = line.split_whitespace().collect::<Vec<_>>().join(" ");
                collapsed
            }
        }
    }
}

/// A sorted, deduplicated set of normalizations, as recorded in the
/// `Normalization:` header field. Two sets with the same members but built
/// in a different order compare and display identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationSet(Vec<Normalization>);

impl NormalizationSet {
    pub fn new(mut items: Vec<Normalization>) -> Self {
        if items.is_empty() {
            items.push(Normalization::None);
        }
        items.sort();
        items.dedup();
        NormalizationSet(items)
    }

    pub fn none() -> Self {
        NormalizationSet(vec![Normalization::None])
    }

    pub fn with_remove_whitespace(remove_whitespace: bool) -> Self {
        if remove_whitespace {
            NormalizationSet(vec![Normalization::RemoveWhitespace])
        } else {
            Self::none()
        }
    }

    /// Apply every normalization in the set, in a fixed canonical order
    /// (`RemoveWhitespace` before anything else that might be added later),
    /// so result is independent of construction order.
    pub fn apply(&self, line: &str) -> String {
        let mut out = line.to_string();
        for n in &self.0 {
            out = n.apply(&out);
        }
        out
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        let items = s
            .split(',')
            .map(|part| Normalization::parse_one(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items))
    }
}

impl fmt::Display for NormalizationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|n| n.name()).collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
