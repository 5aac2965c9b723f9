//! Generic hierarchical data as found in parsed YAML/JSON documents.
//!
//! A [`Value`] is a closed tree of mappings, sequences and scalars. Mappings
//! keep their document order, which the renderer and the sub-path
//! enumeration both rely on.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Ordered key/value pairs with unique keys
pub type Mapping = IndexMap<String, Value>;

#[derive(Error, Debug, PartialEq)]
pub enum ValueError {
  #[error("Unsupported mapping key: {0}")]
  UnsupportedKey(String)
}

/// A leaf value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  /// Integers above `i64::MAX`
  UInt(u64),
  Float(f64),
  String(String)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub enum Value {
  Mapping(Mapping),
  Sequence(Vec<Value>),
  Scalar(Scalar)
}

impl Value {
  /// Builds a mapping from pairs, keeping their order
  pub fn mapping<K, I>(pairs: I) -> Self
  where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>
  {
    Value::Mapping(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }

  pub fn sequence<I: IntoIterator<Item = Value>>(items: I) -> Self {
    Value::Sequence(items.into_iter().collect())
  }

  pub fn null() -> Self {
    Value::Scalar(Scalar::Null)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Scalar(Scalar::String(s.to_string()))
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Scalar(Scalar::String(s))
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Scalar(Scalar::Bool(b))
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Scalar(Scalar::Int(i))
  }
}

impl From<u64> for Value {
  fn from(u: u64) -> Self {
    Value::Scalar(Scalar::UInt(u))
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Value::Scalar(Scalar::Float(f))
  }
}

impl From<Scalar> for serde_yaml::Value {
  fn from(scalar: Scalar) -> Self {
    match scalar {
      Scalar::Null => serde_yaml::Value::Null,
      Scalar::Bool(b) => serde_yaml::Value::Bool(b),
      Scalar::Int(i) => serde_yaml::Value::Number(i.into()),
      Scalar::UInt(u) => serde_yaml::Value::Number(u.into()),
      Scalar::Float(f) => serde_yaml::Value::Number(f.into()),
      Scalar::String(s) => serde_yaml::Value::String(s)
    }
  }
}

impl fmt::Display for Scalar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Scalar::Null => write!(f, "null"),
      Scalar::Bool(b) => write!(f, "{b}"),
      Scalar::Int(i) => write!(f, "{i}"),
      Scalar::UInt(u) => write!(f, "{u}"),
      Scalar::Float(x) => write!(f, "{x}"),
      Scalar::String(s) => write!(f, "{s}")
    }
  }
}

fn number_to_scalar(n: &serde_yaml::Number) -> Scalar {
  if let Some(i) = n.as_i64() {
    Scalar::Int(i)
  } else if let Some(u) = n.as_u64() {
    Scalar::UInt(u)
  } else {
    Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
  }
}

fn key_to_string(key: serde_yaml::Value) -> Result<String, ValueError> {
  match key {
    serde_yaml::Value::String(s) => Ok(s),
    serde_yaml::Value::Bool(b) => Ok(b.to_string()),
    serde_yaml::Value::Number(n) => Ok(n.to_string()),
    serde_yaml::Value::Null => Ok("null".to_string()),
    serde_yaml::Value::Tagged(tagged) => key_to_string(tagged.value),
    other => Err(ValueError::UnsupportedKey(format!("{other:?}")))
  }
}

impl TryFrom<serde_yaml::Value> for Value {
  type Error = ValueError;

  fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
    Ok(match value {
      serde_yaml::Value::Null => Value::Scalar(Scalar::Null),
      serde_yaml::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
      serde_yaml::Value::Number(n) => Value::Scalar(number_to_scalar(&n)),
      serde_yaml::Value::String(s) => Value::Scalar(Scalar::String(s)),
      serde_yaml::Value::Sequence(items) => Value::Sequence(items.into_iter().map(Value::try_from).collect::<Result<_, _>>()?),
      serde_yaml::Value::Mapping(map) => {
        let mut mapping = Mapping::with_capacity(map.len());
        for (key, value) in map {
          mapping.insert(key_to_string(key)?, Value::try_from(value)?);
        }
        Value::Mapping(mapping)
      }
      serde_yaml::Value::Tagged(tagged) => Value::try_from(tagged.value)?
    })
  }
}
