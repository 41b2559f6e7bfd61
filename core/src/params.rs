//! Query parameters and their string encodings.
//!
//! # Design
//! Parameter values form a closed set of kinds, each with one defined string
//! encoding. Multi-valued parameters (`fq`, `facet.field`, ...) repeat the
//! key once per value, which is how Solr expects them. `Params` keys are
//! unique and iterate in sorted order, so the same map always produces the
//! same query string.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Emitted as one `key=value` pair per element. Empty emits nothing.
    Multi(Vec<ParamValue>),
}

impl ParamValue {
    /// Flatten into the encoded strings this value contributes, in order.
    pub fn encode(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<String>) {
        match self {
            ParamValue::Bool(b) => out.push(b.to_string()),
            ParamValue::Integer(i) => out.push(i.to_string()),
            ParamValue::Float(f) => out.push(f.to_string()),
            ParamValue::Text(s) => out.push(s.clone()),
            ParamValue::Multi(values) => {
                for value in values {
                    value.encode_into(out);
                }
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode().join(","))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Text(s.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

macro_rules! integer_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(i: $t) -> Self {
                    ParamValue::Integer(i64::from(i))
                }
            }
        )*
    };
}

integer_param!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => ParamValue::Integer(i),
            Err(_) => ParamValue::Text(i.to_string()),
        }
    }
}

impl From<usize> for ParamValue {
    fn from(i: usize) -> Self {
        ParamValue::from(i as u64)
    }
}

impl From<f32> for ParamValue {
    fn from(f: f32) -> Self {
        ParamValue::Float(f64::from(f))
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue> + Clone> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        ParamValue::Multi(values.iter().cloned().map(Into::into).collect())
    }
}

/// `None` becomes an empty multi-value, so the key is left out of the query.
impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ParamValue::Multi(Vec::new()),
        }
    }
}

/// A set of uniquely-keyed request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A repeated key replaces the earlier value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Every `(key, encoded value)` pair in emission order.
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.0
            .iter()
            .flat_map(|(key, value)| value.encode().into_iter().map(move |v| (key.as_str(), v)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
