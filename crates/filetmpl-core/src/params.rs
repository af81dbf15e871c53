//! Hierarchical parameter model fed to the template renderer.
//!
//! Build metadata arrives as flat dotted keys (`project.version`, `db.host`).
//! [`ParameterNode::put`] splits each key on `.` and files the value under a
//! chain of nested nodes, so a template can address it as `±project.version±`.
//!
//! ```text
//! put("db.host", "localhost")      root
//! put("db.port", 5432)              └── db
//! put("name", "demo")                   ├── host = "localhost"
//!                                       └── port = 5432
//!                                   └── name = "demo"
//! ```
//!
//! When an intermediate segment already holds a scalar, the scalar is replaced
//! by an empty node (last write wins). Well-formed inputs never collide this way,
//! so the replacement is only reported at debug level.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A value stored in the parameter model: a scalar or a nested node.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(DateTime<Local>),
    Path(PathBuf),
    Node(ParameterNode),
}

impl ParameterValue {
    /// The nested node, if this value is one.
    pub fn as_node(&self) -> Option<&ParameterNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The string payload, if this value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => f.write_str(&d.to_rfc3339()),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Node(node) => write!(f, "{{{} entries}}", node.len()),
        }
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
            Self::Path(p) => serializer.serialize_str(&p.display().to_string()),
            Self::Node(node) => node.serialize(serializer),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Local>> for ParameterValue {
    fn from(value: DateTime<Local>) -> Self {
        Self::Date(value)
    }
}

impl From<PathBuf> for ParameterValue {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for ParameterValue {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<ParameterNode> for ParameterValue {
    fn from(value: ParameterNode) -> Self {
        Self::Node(value)
    }
}

/// A mapping from key to [`ParameterValue`]. The root node is the whole model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterNode {
    entries: BTreeMap<String, ParameterValue>,
}

impl ParameterNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under a dotted key, creating intermediate nodes on demand.
    ///
    /// A later `put` with the same key overwrites the earlier value. An
    /// intermediate segment that holds a scalar is replaced by an empty node.
    pub fn put(&mut self, key: &str, value: impl Into<ParameterValue>) {
        self.put_path(key, key, value.into());
    }

    /// Look up a key in this node only; dots are not interpreted.
    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    /// Follow a dotted path through nested nodes.
    pub fn lookup(&self, dotted_key: &str) -> Option<&ParameterValue> {
        let mut segments = dotted_key.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;
        for segment in segments {
            current = current.as_node()?.entries.get(segment)?;
        }
        Some(current)
    }

    /// Feed flat key/value pairs through [`put`](Self::put).
    pub fn extend_flat<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParameterValue>,
    {
        for (key, value) in entries {
            self.put(key.as_ref(), value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every leaf as `(dotted path, display string)`, sorted by path.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for (key, value) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                ParameterValue::Node(node) => node.flatten_into(&path, out),
                scalar => out.push((path, scalar.to_string())),
            }
        }
    }

    fn put_path(&mut self, path: &str, key: &str, value: ParameterValue) {
        match path.split_once('.') {
            Some((segment, rest)) => {
                let mut child = self.take_child(segment, key);
                child.put_path(rest, key, value);
                self.entries
                    .insert(segment.to_string(), ParameterValue::Node(child));
            }
            None => {
                self.entries.insert(path.to_string(), value);
            }
        }
    }

    /// Detach the node under `segment`, or a fresh one if it is absent or a scalar.
    fn take_child(&mut self, segment: &str, key: &str) -> ParameterNode {
        match self.entries.remove(segment) {
            Some(ParameterValue::Node(node)) => node,
            Some(previous) => {
                tracing::debug!(
                    key,
                    segment,
                    previous = %previous,
                    "parameter path collides with a scalar, replacing it with a node"
                );
                ParameterNode::new()
            }
            None => ParameterNode::new(),
        }
    }
}

impl Serialize for ParameterNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: AsRef<str>, V: Into<ParameterValue>> FromIterator<(K, V)> for ParameterNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Self::new();
        node.extend_flat(iter);
        node
    }
}
