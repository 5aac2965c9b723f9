//! Enumeration of every location inside a value.

use super::{Path, PathElement, PathError};
use crate::value::Value;

/// Nesting limit for [`list_paths`]; deeper values are reported as an error
pub const MAX_DEPTH: usize = 256;

/// Lists the path of every node below `value`, relative to `value` itself.
///
/// Paths come out depth-first in document order: a mapping key is listed
/// before the paths inside its value, a sequence index before the paths
/// inside its element. Intermediate nodes are included, not just leaves.
/// Scalars contain no paths.
pub fn list_paths(value: &Value) -> Result<Vec<Path>, PathError> {
  let mut paths = Vec::new();
  collect(value, &Path::root(), 0, &mut paths)?;
  Ok(paths)
}

fn collect(value: &Value, current: &Path, depth: usize, paths: &mut Vec<Path>) -> Result<(), PathError> {
  if depth >= MAX_DEPTH {
    return Err(PathError::TooDeep { limit: MAX_DEPTH });
  }

  match value {
    Value::Mapping(mapping) => {
      for (key, child) in mapping {
        let path = current.child(PathElement::Field(key.clone()));
        paths.push(path.clone());
        collect(child, &path, depth + 1, paths)?;
      }
    }
    Value::Sequence(items) => {
      for (index, child) in items.iter().enumerate() {
        let path = current.child(PathElement::Index(index));
        paths.push(path.clone());
        collect(child, &path, depth + 1, paths)?;
      }
    }
    Value::Scalar(_) => {}
  }

  Ok(())
}
