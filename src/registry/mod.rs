//! Static table registry: target files, shared headers and region markers.
//!
//! Everything here is compiled into the binary and never mutated. The
//! accessors hand out `'static` borrows so callers can share them freely.

pub mod headers;
pub mod markers;
pub mod tables;
pub mod validate;

pub use headers::HEADERS;
pub use markers::{MARKERS, MarkerKind, MarkerPair};
pub use tables::{TABLES, TableSpec};
pub use validate::validate_registry;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub fn tables() -> &'static [TableSpec] {
    &TABLES
}

pub fn headers() -> &'static [&'static str] {
    &HEADERS
}

pub fn markers() -> &'static [(MarkerKind, MarkerPair)] {
    &MARKERS
}

/// Look up a table entry by its exact relative path.
pub fn table_for(path: &str) -> Option<&'static TableSpec> {
    TABLES.iter().find(|t| t.path == path)
}

/// Serializable view of the whole registry, as printed by `list`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Registry {
    pub tables: &'static [TableSpec],
    pub headers: &'static [&'static str],
    #[serde(serialize_with = "serialize_markers")]
    pub markers: &'static [(MarkerKind, MarkerPair)],
}

impl Registry {
    pub fn get() -> Self {
        Self {
            tables: tables(),
            headers: headers(),
            markers: markers(),
        }
    }
}

fn serialize_markers<S: Serializer>(
    markers: &&'static [(MarkerKind, MarkerPair)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(markers.len()))?;
    for (kind, pair) in markers.iter() {
        map.serialize_entry(kind.name(), pair)?;
    }
    map.end()
}
