//! Locations inside a document tree.
//!
//! A [`Path`] is a list of field names and sequence indices. Two paths are
//! the same location iff their canonical strings (the [`fmt::Display`]
//! output, dot style: `a.b[2].c`) are equal.

pub mod walk;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use walk::{list_paths, MAX_DEPTH};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
  #[error("Malformed path {input:?}: {reason}")]
  Malformed { input: String, reason: &'static str },

  #[error("Value is nested deeper than {limit} levels")]
  TooDeep { limit: usize }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
  Field(String),
  Index(usize)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
  elements: Vec<PathElement>
}

impl Path {
  pub fn root() -> Self {
    Self::default()
  }

  /// Parses dot style (`a.b[2].c`) or go-patch style (`/a/b/2/c`) path strings
  pub fn parse(input: &str) -> Result<Self, PathError> {
    let trimmed = input.trim();
    let elements = match trimmed.strip_prefix('/') {
      Some(rest) => parse_gopatch(input, rest)?,
      None => parse_dot(input, trimmed.strip_prefix('.').unwrap_or(trimmed))?
    };

    Ok(Self { elements })
  }

  pub fn elements(&self) -> &[PathElement] {
    &self.elements
  }

  pub fn is_root(&self) -> bool {
    self.elements.is_empty()
  }

  /// Returns a new path with `other` appended to this one
  pub fn concat(&self, other: &Path) -> Path {
    let mut elements = Vec::with_capacity(self.elements.len() + other.elements.len());
    elements.extend_from_slice(&self.elements);
    elements.extend_from_slice(&other.elements);
    Path { elements }
  }

  pub fn child(&self, element: PathElement) -> Path {
    let mut elements = self.elements.clone();
    elements.push(element);
    Path { elements }
  }
}

fn malformed(input: &str, reason: &'static str) -> PathError {
  PathError::Malformed { input: input.to_string(), reason }
}

fn parse_gopatch(input: &str, rest: &str) -> Result<Vec<PathElement>, PathError> {
  if rest.is_empty() {
    return Ok(Vec::new());
  }

  rest
    .split('/')
    .map(|segment| {
      if segment.is_empty() {
        Err(malformed(input, "empty segment"))
      } else if segment.chars().all(|c| c.is_ascii_digit()) {
        segment
          .parse()
          .map(PathElement::Index)
          .map_err(|_| malformed(input, "index out of range"))
      } else {
        Ok(PathElement::Field(segment.to_string()))
      }
    })
    .collect()
}

fn parse_dot(input: &str, rest: &str) -> Result<Vec<PathElement>, PathError> {
  let mut elements = Vec::new();
  if rest.is_empty() {
    return Ok(elements);
  }

  for segment in rest.split('.') {
    let (name, mut brackets) = match segment.find('[') {
      Some(pos) => segment.split_at(pos),
      None => (segment, "")
    };

    if name.is_empty() && brackets.is_empty() {
      return Err(malformed(input, "empty segment"));
    }
    if name.contains(']') {
      return Err(malformed(input, "unexpected ']'"));
    }
    if !name.is_empty() {
      elements.push(PathElement::Field(name.to_string()));
    }

    while !brackets.is_empty() {
      let inner = brackets
        .strip_prefix('[')
        .ok_or_else(|| malformed(input, "unexpected text after ']'"))?;
      let end = inner.find(']').ok_or_else(|| malformed(input, "unterminated '['"))?;
      let index = &inner[..end];
      if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed(input, "index must be a non-negative integer"));
      }
      let index = index.parse().map_err(|_| malformed(input, "index out of range"))?;
      elements.push(PathElement::Index(index));
      brackets = &inner[end + 1..];
    }
  }

  Ok(elements)
}

impl fmt::Display for Path {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.elements.is_empty() {
      return write!(f, ".");
    }

    for (i, element) in self.elements.iter().enumerate() {
      match element {
        PathElement::Field(name) if i == 0 => write!(f, "{name}")?,
        PathElement::Field(name) => write!(f, ".{name}")?,
        PathElement::Index(index) => write!(f, "[{index}]")?
      }
    }

    Ok(())
  }
}

impl FromStr for Path {
  type Err = PathError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Path::parse(s)
  }
}

impl TryFrom<String> for Path {
  type Error = PathError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Path::parse(&value)
  }
}

impl From<Path> for String {
  fn from(path: Path) -> Self {
    path.to_string()
  }
}
