//! Authoring-time checks over the registry.

use crate::registry::{MarkerKind, MarkerPair, TableSpec};
use anyhow::{Context, bail};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// Sentinels are single HTML comments holding an upper-case name.
const SENTINEL_RE: &str = r"^<!-- [A-Z][A-Z0-9_]* -->$";

pub fn validate(
    tables: &[TableSpec],
    headers: &[&str],
    markers: &[(MarkerKind, MarkerPair)],
) -> anyhow::Result<()> {
    validate_tables(tables)?;
    validate_headers(headers)?;
    validate_markers(markers)?;
    Ok(())
}

fn validate_tables(tables: &[TableSpec]) -> anyhow::Result<()> {
    let mut seen = BTreeSet::new();
    for t in tables {
        if t.path.trim().is_empty() {
            bail!("table entry with empty path");
        }
        if Path::new(t.path).is_absolute() {
            bail!("table path must be relative: {}", t.path);
        }
        if !t.path.ends_with(".md") {
            bail!("table path is not a markdown file: {}", t.path);
        }
        if !seen.insert(t.path) {
            bail!("duplicate table path: {}", t.path);
        }
        if !t.salary && t.interval.is_some() {
            bail!("table {} sets an interval without a salary column", t.path);
        }

        let mut keys = BTreeSet::new();
        for k in t.query.keys() {
            if !keys.insert(k) {
                bail!("table {} repeats query key {}", t.path, k);
            }
        }
    }
    Ok(())
}

fn validate_headers(headers: &[&str]) -> anyhow::Result<()> {
    if headers.is_empty() {
        bail!("header list is empty");
    }
    let mut seen = BTreeSet::new();
    for h in headers {
        if !seen.insert(*h) {
            bail!("duplicate header: {}", h);
        }
    }
    Ok(())
}

fn validate_markers(markers: &[(MarkerKind, MarkerPair)]) -> anyhow::Result<()> {
    let re = Regex::new(SENTINEL_RE)?;

    let mut kinds = BTreeSet::new();
    let mut sentinels = BTreeSet::new();
    for (kind, pair) in markers {
        if !kinds.insert(*kind) {
            bail!("marker {} registered twice", kind);
        }
        if pair.start == pair.end {
            bail!("marker {} uses the same sentinel for start and end", kind);
        }
        for s in [pair.start, pair.end] {
            if !re.is_match(s) {
                bail!("marker {} has malformed sentinel {:?}", kind, s);
            }
            if !sentinels.insert(s) {
                bail!("sentinel {} is shared by more than one marker", s);
            }
        }
    }
    Ok(())
}

/// Validate the compiled-in registry.
pub fn validate_registry() -> anyhow::Result<()> {
    validate(
        crate::registry::tables(),
        crate::registry::headers(),
        crate::registry::markers(),
    )
    .context("table registry is invalid")
}
