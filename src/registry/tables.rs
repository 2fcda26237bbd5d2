//! Table registry: one entry per generated markdown file.
//!
//! Each entry names the file, whether it shows a salary column (and in which
//! unit), and the remote query the renderer runs to fill it.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Unit used to normalize displayed salary figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Hr,
    Yr,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Hr => "hr",
            Interval::Yr => "yr",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote operation the renderer calls for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rpc {
    GetJobs,
    GetMidLevelRemoteUsaJobs,
}

impl Rpc {
    pub fn as_str(self) -> &'static str {
        match self {
            Rpc::GetJobs => "get_jobs",
            Rpc::GetMidLevelRemoteUsaJobs => "get_mid_level_remote_usa_jobs",
        }
    }
}

impl fmt::Display for Rpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter value passed through to the RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Str(&'static str),
    Bool(bool),
    Int(i64),
}

/// Opaque, ordered filter parameters for one RPC call.
///
/// The accepted keys depend on the RPC provider; nothing here enforces a
/// per-operation schema. Serializes as a JSON object in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query(pub &'static [(&'static str, QueryValue)]);

impl Query {
    pub fn get(&self, name: &str) -> Option<QueryValue> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(k, _)| *k)
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    /// Output file, relative to the repository root.
    pub path: &'static str,
    pub salary: bool,
    /// Only meaningful when `salary` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    pub rpc: Rpc,
    pub query: Query,
}

use QueryValue::{Bool, Int, Str};

pub static TABLES: [TableSpec; 5] = [
    TableSpec {
        path: "README.md",
        salary: true,
        interval: Some(Interval::Hr),
        rpc: Rpc::GetJobs,
        query: Query(&[("job_type", Str("intern")), ("is_usa", Bool(true))]),
    },
    TableSpec {
        path: "NEW_GRAD_USA.md",
        salary: true,
        interval: Some(Interval::Yr),
        rpc: Rpc::GetJobs,
        query: Query(&[("job_type", Str("new_grad")), ("is_usa", Bool(true))]),
    },
    TableSpec {
        path: "INTERN_INTL.md",
        salary: false,
        interval: None,
        rpc: Rpc::GetJobs,
        query: Query(&[("job_type", Str("intern")), ("is_usa", Bool(false))]),
    },
    TableSpec {
        path: "NEW_GRAD_INTL.md",
        salary: false,
        interval: None,
        rpc: Rpc::GetJobs,
        query: Query(&[("job_type", Str("new_grad")), ("is_usa", Bool(false))]),
    },
    TableSpec {
        path: "MID_LEVEL_REMOTE_USA.md",
        salary: true,
        interval: Some(Interval::Yr),
        rpc: Rpc::GetMidLevelRemoteUsaJobs,
        query: Query(&[
            ("is_usa", Bool(true)),
            ("remote_only", Bool(true)),
            ("min_experience_years", Int(3)),
            ("max_experience_years", Int(9)),
        ]),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_grad_usa_entry() {
        let t = TABLES
            .iter()
            .find(|t| t.path == "NEW_GRAD_USA.md")
            .expect("entry present");
        assert!(t.salary);
        assert_eq!(t.interval.map(Interval::as_str), Some("yr"));
        assert_eq!(t.rpc.as_str(), "get_jobs");
        assert_eq!(t.query.get("job_type"), Some(Str("new_grad")));
        assert_eq!(t.query.get("is_usa"), Some(Bool(true)));
    }

    #[test]
    fn paths_are_unique() {
        let mut paths: Vec<_> = TABLES.iter().map(|t| t.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), TABLES.len());
    }

    #[test]
    fn interval_only_with_salary() {
        for t in &TABLES {
            if !t.salary {
                assert_eq!(t.interval, None, "{}", t.path);
            }
        }
    }

    #[test]
    fn serializes_query_as_ordered_object() {
        let mid = &TABLES[4];
        let json = serde_json::to_string(mid).unwrap();
        assert_eq!(
            json,
            r#"{"path":"MID_LEVEL_REMOTE_USA.md","salary":true,"interval":"yr","rpc":"get_mid_level_remote_usa_jobs","query":{"is_usa":true,"remote_only":true,"min_experience_years":3,"max_experience_years":9}}"#
        );
    }

    #[test]
    fn absent_interval_is_omitted() {
        let v = serde_json::to_value(&TABLES[2]).unwrap();
        assert_eq!(v.get("interval"), None);
        assert_eq!(v["salary"], serde_json::Value::Bool(false));
        assert_eq!(v["query"]["is_usa"], serde_json::Value::Bool(false));
    }
}
