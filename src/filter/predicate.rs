//! Membership tests over diff locations.

use std::collections::HashSet;
use std::fmt;
use std::ops::Not;

use regex::Regex;

use super::FilterError;
use crate::path::Path;

type Test = Box<dyn Fn(Option<&Path>) -> bool>;

/// A boolean test over an optional path.
///
/// `None` stands for a diff without a location. Inclusion predicates never
/// match it; their negations therefore always do.
pub struct PathPredicate {
  test: Test
}

impl PathPredicate {
  pub fn new(test: impl Fn(Option<&Path>) -> bool + 'static) -> Self {
    Self { test: Box::new(test) }
  }

  pub fn matches(&self, path: Option<&Path>) -> bool {
    (self.test)(path)
  }
}

impl Not for PathPredicate {
  type Output = PathPredicate;

  fn not(self) -> Self::Output {
    let test = self.test;
    PathPredicate::new(move |path| !test(path))
  }
}

impl fmt::Debug for PathPredicate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PathPredicate").finish_non_exhaustive()
  }
}

/// Matches paths equal to one of `paths`.
///
/// Path strings that fail to parse are dropped from the set: they can never
/// match, and no error is raised for them.
pub fn paths<S: AsRef<str>>(paths: &[S]) -> PathPredicate {
  let wanted: HashSet<String> = paths
    .iter()
    .filter_map(|input| match Path::parse(input.as_ref()) {
      Ok(path) => Some(path.to_string()),
      Err(err) => {
        log::warn!("Ignoring path filter: {err}");
        None
      }
    })
    .collect();

  log::debug!("Path predicate over {} of {} path(s)", wanted.len(), paths.len());
  PathPredicate::new(move |path| path.is_some_and(|path| wanted.contains(&path.to_string())))
}

/// Matches paths equal to none of `paths`
pub fn excluding_paths<S: AsRef<str>>(paths: &[S]) -> PathPredicate {
  !self::paths(paths)
}

/// Matches paths whose canonical string matches at least one of `patterns`.
///
/// Fails on the first pattern that does not compile.
pub fn patterns<S: AsRef<str>>(patterns: &[S]) -> Result<PathPredicate, FilterError> {
  let regexes = patterns
    .iter()
    .map(|pattern| {
      Regex::new(pattern.as_ref()).map_err(|source| FilterError::InvalidPattern {
        pattern: pattern.as_ref().to_string(),
        source
      })
    })
    .collect::<Result<Vec<_>, _>>()?;

  log::debug!("Regexp predicate over {} pattern(s)", regexes.len());
  Ok(PathPredicate::new(move |path| {
    path.is_some_and(|path| {
      let path = path.to_string();
      regexes.iter().any(|regex| regex.is_match(&path))
    })
  }))
}

/// Matches paths whose canonical string matches none of `patterns`
pub fn excluding_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<PathPredicate, FilterError> {
  self::patterns(patterns).map(Not::not)
}
