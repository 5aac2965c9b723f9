//! Structural diff reports between two documents.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::path::Path;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
  #[serde(rename = "ADDITION", alias = "+")]
  Addition,
  #[serde(rename = "REMOVAL", alias = "-")]
  Removal,
  #[serde(rename = "MODIFICATION", alias = "±")]
  Modification,
  #[serde(rename = "ORDER_CHANGE", alias = "⇆")]
  OrderChange
}

impl Kind {
  pub fn symbol(&self) -> &'static str {
    match self {
      Kind::Addition => "+",
      Kind::Removal => "-",
      Kind::Modification => "±",
      Kind::OrderChange => "⇆"
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Kind::Addition => "added",
      Kind::Removal => "removed",
      Kind::Modification => "value change",
      Kind::OrderChange => "order changed"
    }
  }
}

impl Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// One specific change at a diff's location
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detail {
  pub kind: Kind,
  #[serde(default)]
  pub from: Option<Value>,
  #[serde(default)]
  pub to:   Option<Value>
}

impl Detail {
  pub fn new(kind: Kind, from: Option<Value>, to: Option<Value>) -> Self {
    Self { kind, from, to }
  }

  /// The before and after values that are present, in that order
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.from.iter().chain(self.to.iter())
  }
}

/// All changes at one location. A diff without a path has no location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Diff {
  #[serde(default)]
  pub path:    Option<Path>,
  #[serde(default)]
  pub details: Vec<Detail>
}

impl Diff {
  pub fn new(path: Option<Path>, details: Vec<Detail>) -> Self {
    Self { path, details }
  }

  pub fn has_kind(&self, kind: Kind) -> bool {
    self.details.iter().any(|detail| detail.kind == kind)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Report {
  #[serde(default)]
  pub from:  String,
  #[serde(default)]
  pub to:    String,
  #[serde(default)]
  pub diffs: Vec<Diff>
}

impl Report {
  pub fn new(from: impl Into<String>, to: impl Into<String>, diffs: Vec<Diff>) -> Self {
    Self { from: from.into(), to: to.into(), diffs }
  }

  /// Parses a report from YAML (or JSON) text
  pub fn from_yaml(input: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(input)
  }

  /// A report between the same documents with a different set of diffs
  pub(crate) fn with_diffs(&self, diffs: Vec<Diff>) -> Self {
    Self { from: self.from.clone(), to: self.to.clone(), diffs }
  }
}
