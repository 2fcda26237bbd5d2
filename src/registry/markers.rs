//! Marker comments delimiting renderer-owned regions in markdown files.
//!
//! A region looks like:
//!
//! ```text
//! <!-- TABLE_START -->
//! ...generated rows...
//! <!-- TABLE_END -->
//! ```
//!
//! Each sentinel must appear at most once per document, start before end.

use anyhow::bail;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Faang,
    Quant,
    Other,
}

impl MarkerKind {
    pub fn name(self) -> &'static str {
        match self {
            MarkerKind::Faang => "faang",
            MarkerKind::Quant => "quant",
            MarkerKind::Other => "other",
        }
    }

    pub fn pair(self) -> &'static MarkerPair {
        match self {
            MarkerKind::Faang => &FAANG,
            MarkerKind::Quant => &QUANT,
            MarkerKind::Other => &OTHER,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

/// Byte range of a region's content, exclusive of both sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn content<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }
}

impl MarkerPair {
    /// Find this pair's region in `doc`.
    ///
    /// Returns `Ok(None)` when neither sentinel is present. A lone sentinel, a
    /// repeated sentinel, or an end placed before its start is an error.
    pub fn locate(&self, doc: &str) -> anyhow::Result<Option<Region>> {
        let starts: Vec<usize> = doc.match_indices(self.start).map(|(i, _)| i).collect();
        let ends: Vec<usize> = doc.match_indices(self.end).map(|(i, _)| i).collect();

        match (starts.as_slice(), ends.as_slice()) {
            ([], []) => Ok(None),
            ([s], [e]) => {
                let content_start = s + self.start.len();
                if content_start > *e {
                    bail!("{} appears before {}", self.end, self.start);
                }
                Ok(Some(Region {
                    start: content_start,
                    end: *e,
                }))
            }
            ([], _) => bail!("found {} without {}", self.end, self.start),
            (_, []) => bail!("found {} without {}", self.start, self.end),
            (s, e) => bail!(
                "{} and {} must each appear once (found {} and {})",
                self.start,
                self.end,
                s.len(),
                e.len()
            ),
        }
    }
}

const FAANG: MarkerPair = MarkerPair {
    start: "<!-- TABLE_FAANG_START -->",
    end: "<!-- TABLE_FAANG_END -->",
};

const QUANT: MarkerPair = MarkerPair {
    start: "<!-- TABLE_QUANT_START -->",
    end: "<!-- TABLE_QUANT_END -->",
};

const OTHER: MarkerPair = MarkerPair {
    start: "<!-- TABLE_START -->",
    end: "<!-- TABLE_END -->",
};

pub static MARKERS: [(MarkerKind, MarkerPair); 3] = [
    (MarkerKind::Faang, FAANG),
    (MarkerKind::Quant, QUANT),
    (MarkerKind::Other, OTHER),
];
