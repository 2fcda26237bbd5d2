//! Scan registry target files and report on their marker regions.

use crate::Result;
use crate::registry::{MarkerKind, MarkerPair, TableSpec};

use anyhow::Context;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Anything that looks like a table sentinel, registered or not.
const TABLE_SENTINEL_RE: &str = r"<!-- TABLE(?:_[A-Z0-9]+)*_(?:START|END) -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Missing,
    Invalid,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Ok => "ok",
            FileStatus::Missing => "missing",
            FileStatus::Invalid => "invalid",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionView {
    pub marker: MarkerKind,
    /// 1-based lines of the start and end sentinels.
    pub start_line: usize,
    pub end_line: usize,
    /// Markdown table lines currently inside the region.
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    pub regions: Vec<RegionView>,
    pub errors: Vec<String>,
    pub unknown_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub root: String,
    pub files: Vec<FileReport>,
    pub totals: TotalsView,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TotalsView {
    pub files: usize,
    pub missing: usize,
    pub regions: usize,
    pub errors: usize,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.totals.errors > 0
    }
}

/// Check every table's target file under `root`.
///
/// Missing files and files without any region are warnings; malformed
/// regions are recorded as errors. Only I/O failures other than "not found"
/// abort the scan.
pub fn check_tables(
    root: &Path,
    tables: &[TableSpec],
    markers: &[(MarkerKind, MarkerPair)],
) -> Result<CheckReport> {
    let sentinel_re = Regex::new(TABLE_SENTINEL_RE)?;
    let known: BTreeSet<&str> = markers
        .iter()
        .flat_map(|(_, p)| [p.start, p.end])
        .collect();

    let mut files = Vec::with_capacity(tables.len());
    let mut totals = TotalsView::default();

    for table in tables {
        let path = root.join(table.path);
        let report = match fs::read_to_string(&path) {
            Ok(doc) => check_document(table.path, &doc, markers, &sentinel_re, &known),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "target file not found");
                FileReport {
                    path: table.path.to_string(),
                    status: FileStatus::Missing,
                    regions: vec![],
                    errors: vec![],
                    unknown_markers: vec![],
                }
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read target file {}", path.display()));
            }
        };

        totals.files += 1;
        totals.regions += report.regions.len();
        totals.errors += report.errors.len();
        if report.status == FileStatus::Missing {
            totals.missing += 1;
        }
        files.push(report);
    }

    Ok(CheckReport {
        root: root.display().to_string(),
        files,
        totals,
    })
}

fn check_document(
    path: &str,
    doc: &str,
    markers: &[(MarkerKind, MarkerPair)],
    sentinel_re: &Regex,
    known: &BTreeSet<&str>,
) -> FileReport {
    let mut regions = Vec::new();
    let mut errors = Vec::new();

    for (kind, pair) in markers {
        match pair.locate(doc) {
            Ok(Some(region)) => {
                let content = region.content(doc);
                let view = RegionView {
                    marker: *kind,
                    start_line: line_of(doc, region.start - pair.start.len()),
                    end_line: line_of(doc, region.end),
                    rows: content
                        .lines()
                        .filter(|l| l.trim_start().starts_with('|'))
                        .count(),
                };
                debug!(path, marker = %kind, rows = view.rows, "found region");
                regions.push(view);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(path, marker = %kind, "{e:#}");
                errors.push(format!("{kind}: {e:#}"));
            }
        }
    }

    if regions.is_empty() && errors.is_empty() {
        warn!(path, "no table region found");
    }

    let mut unknown_markers: Vec<String> = sentinel_re
        .find_iter(doc)
        .map(|m| m.as_str())
        .filter(|s| !known.contains(s))
        .map(str::to_string)
        .collect();
    unknown_markers.sort();
    unknown_markers.dedup();
    for m in &unknown_markers {
        warn!(path, sentinel = %m, "unregistered table sentinel");
    }

    let status = if errors.is_empty() {
        FileStatus::Ok
    } else {
        FileStatus::Invalid
    };

    FileReport {
        path: path.to_string(),
        status,
        regions,
        errors,
        unknown_markers,
    }
}

/// 1-based line number containing byte offset `at`.
fn line_of(doc: &str, at: usize) -> usize {
    doc[..at].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MARKERS, TABLES};
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn reports_regions_missing_files_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "README.md",
            "# Interns\n\
             <!-- TABLE_FAANG_START -->\n\
             | Company | Position |\n\
             | --- | --- |\n\
             | Acme | SWE |\n\
             <!-- TABLE_FAANG_END -->\n\
             <!-- TABLE_START -->\n\
             <!-- TABLE_END -->\n",
        );
        write(
            dir.path(),
            "NEW_GRAD_USA.md",
            "<!-- TABLE_END -->\n<!-- TABLE_START -->\n",
        );
        write(dir.path(), "INTERN_INTL.md", "no tables yet\n");
        write(
            dir.path(),
            "NEW_GRAD_INTL.md",
            "<!-- TABLE_START -->\n<!-- TABLE_END -->\n<!-- TABLE_CRYPTO_START -->\n",
        );

        let report = check_tables(dir.path(), &TABLES, &MARKERS).unwrap();
        assert_eq!(report.files.len(), 5);

        let readme = &report.files[0];
        assert_eq!(readme.status, FileStatus::Ok);
        assert_eq!(
            readme.regions,
            vec![
                RegionView {
                    marker: MarkerKind::Faang,
                    start_line: 2,
                    end_line: 6,
                    rows: 3,
                },
                RegionView {
                    marker: MarkerKind::Other,
                    start_line: 7,
                    end_line: 8,
                    rows: 0,
                },
            ]
        );

        let new_grad = &report.files[1];
        assert_eq!(new_grad.status, FileStatus::Invalid);
        assert_eq!(new_grad.errors.len(), 1);
        assert!(new_grad.errors[0].starts_with("other: "));

        assert_eq!(report.files[2].status, FileStatus::Ok);
        assert!(report.files[2].regions.is_empty());

        assert_eq!(
            report.files[3].unknown_markers,
            vec!["<!-- TABLE_CRYPTO_START -->".to_string()]
        );

        assert_eq!(report.files[4].status, FileStatus::Missing);

        assert_eq!(report.totals.files, 5);
        assert_eq!(report.totals.missing, 1);
        assert_eq!(report.totals.regions, 3);
        assert_eq!(report.totals.errors, 1);
        assert!(report.has_errors());
    }

    #[test]
    fn clean_tree_has_no_errors() {
        let dir = tempfile::tempdir().unwrap();
        for t in &TABLES {
            write(dir.path(), t.path, "<!-- TABLE_START -->\n<!-- TABLE_END -->\n");
        }
        let report = check_tables(dir.path(), &TABLES, &MARKERS).unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.totals.missing, 0);
        assert_eq!(report.totals.regions, TABLES.len());
    }

    #[test]
    fn status_display_matches_json() {
        for status in [FileStatus::Ok, FileStatus::Missing, FileStatus::Invalid] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::from(status.to_string()));
        }
        assert_eq!(format!("{:<8}|", FileStatus::Ok), "ok      |");
    }

    #[test]
    fn line_numbers_are_one_based() {
        assert_eq!(line_of("abc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 4), 3);
    }
}
