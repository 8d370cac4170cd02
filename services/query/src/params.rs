//! Parameter flattening for the AWS query protocol.
//!
//! Query protocol operations take nested structures but the wire format is
//! a flat `application/x-www-form-urlencoded` body. AWS names the
//! flattened members with dotted paths and 1-based list indexes:
//!
//! ```text
//! {a: {b: 1, c: [2, 3]}}  =>  a.b=1, a.c.1=2, a.c.2=3
//! ```

use crate::constants::AWS_QUERY_ENCODE_SET;
use percent_encoding::utf8_percent_encode;

/// A parameter value in a query protocol request.
///
/// The variants mirror what the wire format can carry: scalars, lists,
/// and nested maps. `Null` exists so absent members are an explicit state
/// instead of an accidental fallthrough; flattening emits nothing for it.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// An absent member. Flattening skips it entirely.
    Null,
    /// A scalar, already stringified.
    Scalar(String),
    /// A list, flattened with 1-based indexes.
    List(Vec<ParamValue>),
    /// A nested map, flattened under a dotted prefix.
    Map(ParamMap),
}

/// An ordered parameter map.
///
/// Iteration order is insertion order. Inserting a key that already
/// exists replaces its value in place, mirroring form-encoded parameter
/// map behavior; there is no collision error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any existing value under the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into ordered `(name, value)` pairs using AWS's
    /// dotted/indexed naming.
    ///
    /// - map members recurse under `{prefix}.{key}`
    /// - list elements recurse under `{prefix}.{index}` with 1-based indexes
    /// - a later flattened name silently overwrites an earlier identical one
    /// - `Null` members produce nothing
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut flat = Vec::new();
        flatten_map(None, self, &mut flat);
        flat
    }

    /// Encode the flattened parameters as a form-urlencoded body.
    ///
    /// The returned string's bytes are the request payload; its SHA-256
    /// is what the canonical request embeds.
    pub fn to_form_urlencoded(&self) -> String {
        let mut s = String::new();
        for (idx, (k, v)) in self.flatten().iter().enumerate() {
            if idx > 0 {
                s.push('&');
            }
            s.push_str(&utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string());
            s.push('=');
            s.push_str(&utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string());
        }
        s
    }
}

impl FromIterator<(String, ParamValue)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

fn flatten_map(prefix: Option<&str>, map: &ParamMap, out: &mut Vec<(String, String)>) {
    for (key, value) in &map.entries {
        let name = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        flatten_value(&name, value, out);
    }
}

fn flatten_value(name: &str, value: &ParamValue, out: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Null => {}
        ParamValue::Scalar(s) => match out.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = s.clone(),
            None => out.push((name.to_string(), s.clone())),
        },
        ParamValue::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_value(&format!("{}.{}", name, idx + 1), item, out);
            }
        }
        ParamValue::Map(map) => flatten_map(Some(name), map, out),
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Scalar(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Scalar(v.to_string())
    }
}

impl From<ParamMap> for ParamValue {
    fn from(v: ParamMap) -> Self {
        ParamValue::Map(v)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Scalar(b.to_string()),
            serde_json::Value::Number(n) => ParamValue::Scalar(n.to_string()),
            serde_json::Value::String(s) => ParamValue::Scalar(s),
            serde_json::Value::Array(items) => {
                ParamValue::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(members) => ParamValue::Map(
                members
                    .into_iter()
                    .map(|(k, v)| (k, ParamValue::from(v)))
                    .collect(),
            ),
        }
    }
}
