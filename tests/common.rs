#![allow(dead_code)]

use neatdiff::{Detail, Diff, Kind, Path, Report, Value};

pub fn diff(path: &str, details: Vec<Detail>) -> Diff {
  Diff::new(Some(Path::parse(path).unwrap()), details)
}

pub fn modification(from: impl Into<Value>, to: impl Into<Value>) -> Detail {
  Detail::new(Kind::Modification, Some(from.into()), Some(to.into()))
}

pub fn addition(to: Value) -> Detail {
  Detail::new(Kind::Addition, None, Some(to))
}

pub fn removal(from: Value) -> Detail {
  Detail::new(Kind::Removal, Some(from), None)
}

pub fn report(diffs: Vec<Diff>) -> Report {
  Report::new("from.yaml", "to.yaml", diffs)
}

pub fn paths(report: &Report) -> Vec<String> {
  report
    .diffs
    .iter()
    .map(|diff| diff.path.as_ref().map(ToString::to_string).unwrap_or_default())
    .collect()
}

/// A small deployment-like report touching several locations
pub fn deployment_report() -> Report {
  report(vec![
    diff("metadata.name", vec![modification("web", "api")]),
    diff("spec.replicas", vec![modification(1i64, 3i64)]),
    diff("spec.template.labels", vec![addition(Value::mapping(vec![("tier", "frontend".into())]))]),
    diff("spec.ports[1]", vec![removal(8080i64.into())]),
    diff("spec.ports", vec![Detail::new(
      Kind::OrderChange,
      Some(Value::sequence(vec![80i64.into(), 443i64.into()])),
      Some(Value::sequence(vec![443i64.into(), 80i64.into()]))
    )]),
  ])
}
