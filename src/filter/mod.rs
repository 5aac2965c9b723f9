//! Narrowing a report down to the diffs at selected locations.
//!
//! A diff survives a predicate only if its own path matches and so does
//! every location inside its before and after values. Filtering only ever
//! removes diffs; the ones that remain keep their order.

pub mod predicate;

use thiserror::Error;

pub use predicate::PathPredicate;

use crate::path::list_paths;
use crate::report::{Diff, Kind, Report};

#[derive(Error, Debug)]
pub enum FilterError {
  #[error("Invalid regular expression {pattern:?}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source:  regex::Error
  }
}

/// Checks a diff's path and every sub-path inside its detail values
fn includes(diff: &Diff, predicate: &PathPredicate) -> bool {
  if !predicate.matches(diff.path.as_ref()) {
    return false;
  }

  for value in diff.details.iter().flat_map(|detail| detail.values()) {
    let sub_paths = match list_paths(value) {
      Ok(sub_paths) => sub_paths,
      Err(err) => {
        log::warn!("Skipping sub-path checks below {}: {err}", display_path(diff));
        continue;
      }
    };

    for sub_path in sub_paths {
      let full = diff.path.as_ref().map(|path| path.concat(&sub_path));
      if !predicate.matches(full.as_ref()) {
        log::trace!("Sub-path {} rejected", full.map(|p| p.to_string()).unwrap_or_default());
        return false;
      }
    }
  }

  true
}

fn display_path(diff: &Diff) -> String {
  diff
    .path
    .as_ref()
    .map(ToString::to_string)
    .unwrap_or_else(|| "(no path)".to_string())
}

/// Returns a new report with the diffs of `report` that fully satisfy `predicate`
pub fn filter(report: &Report, predicate: &PathPredicate) -> Report {
  let diffs: Vec<Diff> = report
    .diffs
    .iter()
    .filter(|diff| {
      let keep = includes(diff, predicate);
      log::debug!("{} {}", if keep { "Keeping" } else { "Dropping" }, display_path(diff));
      keep
    })
    .cloned()
    .collect();

  log::debug!("Filter kept {} of {} diff(s)", diffs.len(), report.diffs.len());
  report.with_diffs(diffs)
}

impl Report {
  /// Keeps only the diffs at the given locations.
  ///
  /// Without any paths the report is returned unchanged. Paths that fail to
  /// parse are ignored rather than reported.
  pub fn filter<S: AsRef<str>>(&self, paths: &[S]) -> Report {
    if paths.is_empty() {
      return self.clone();
    }

    filter(self, &predicate::paths(paths))
  }

  /// Drops the diffs at the given locations; the identity without any paths
  pub fn exclude<S: AsRef<str>>(&self, paths: &[S]) -> Report {
    if paths.is_empty() {
      return self.clone();
    }

    filter(self, &predicate::excluding_paths(paths))
  }

  /// Keeps only the diffs whose locations match one of the regular expressions
  pub fn filter_regexp<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Report, FilterError> {
    if patterns.is_empty() {
      return Ok(self.clone());
    }

    Ok(filter(self, &predicate::patterns(patterns)?))
  }

  /// Drops the diffs whose locations match any of the regular expressions
  pub fn exclude_regexp<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Report, FilterError> {
    if patterns.is_empty() {
      return Ok(self.clone());
    }

    Ok(filter(self, &predicate::excluding_patterns(patterns)?))
  }

  pub fn filter_by(&self, predicate: &PathPredicate) -> Report {
    filter(self, predicate)
  }

  /// Drops every diff that carries a value modification.
  ///
  /// Only the kinds of the top-level details are inspected.
  pub fn ignore_value_changes(&self) -> Report {
    let diffs = self
      .diffs
      .iter()
      .filter(|diff| !diff.has_kind(Kind::Modification))
      .cloned()
      .collect();

    self.with_diffs(diffs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::path::Path;
  use crate::report::Detail;
  use crate::value::Value;

  fn diff(path: &str, details: Vec<Detail>) -> Diff {
    Diff::new(Some(Path::parse(path).unwrap()), details)
  }

  fn modification(from: Value, to: Value) -> Detail {
    Detail::new(Kind::Modification, Some(from), Some(to))
  }

  #[test]
  fn test_each_diff_is_judged_on_its_own() {
    let report = Report::new("a", "b", vec![
      diff("x", vec![modification(1i64.into(), 2i64.into())]),
      diff("y", vec![modification(1i64.into(), 2i64.into())]),
      diff("x", vec![modification(3i64.into(), 4i64.into())]),
    ]);

    let result = report.filter(&["x"]);
    assert_eq!(result.diffs, vec![report.diffs[0].clone(), report.diffs[2].clone()]);
  }

  #[test]
  fn test_pathless_diff_with_nested_values() {
    let nested = Value::mapping(vec![("k", "v".into())]);
    let report = Report::new("a", "b", vec![Diff::new(None, vec![Detail::new(Kind::Addition, None, Some(nested))])]);

    assert!(report.filter(&["k"]).diffs.is_empty());
    assert_eq!(report.exclude(&["k"]).diffs.len(), 1);
  }

  #[test]
  fn test_enumeration_failure_counts_as_no_sub_paths() {
    let mut deep = Value::from("leaf");
    for _ in 0..crate::path::MAX_DEPTH + 1 {
      deep = Value::mapping(vec![("n", deep)]);
    }
    let report = Report::new("a", "b", vec![diff("a", vec![Detail::new(Kind::Addition, None, Some(deep))])]);

    assert_eq!(report.filter(&["a"]).diffs.len(), 1);
  }

  #[test]
  fn test_filter_by_custom_predicate() {
    let report = Report::new("a", "b", vec![
      diff("short", vec![]),
      diff("much.longer.path", vec![]),
    ]);

    let shallow = PathPredicate::new(|path| path.is_some_and(|p| p.elements().len() < 2));
    let result = report.filter_by(&shallow);
    assert_eq!(result.diffs, vec![report.diffs[0].clone()]);
  }
}
