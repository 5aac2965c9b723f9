mod common;

use common::*;
use neatdiff::filter::{self, predicate};
use neatdiff::{Detail, FilterError, Kind, Value};

#[test]
fn test_zero_arguments_are_identity() {
  let report = deployment_report();
  let none: &[&str] = &[];

  assert_eq!(report.filter(none), report);
  assert_eq!(report.exclude(none), report);
  assert_eq!(report.filter_regexp(none).unwrap(), report);
  assert_eq!(report.exclude_regexp(none).unwrap(), report);
}

#[test]
fn test_filter_single_path() {
  let report = report(vec![diff("a.b[0]", vec![modification(1i64, 2i64)])]);

  let filtered = report.filter(&["a.b[0]"]);
  assert_eq!(filtered.diffs, report.diffs);

  let excluded = report.exclude(&["a.b[0]"]);
  assert!(excluded.diffs.is_empty());
  assert_eq!(excluded.from, "from.yaml");
  assert_eq!(excluded.to, "to.yaml");
}

#[test]
fn test_filter_and_exclude_are_complementary() {
  let report = deployment_report();
  let selection = ["spec.replicas", "/metadata/name"];

  let kept = report.filter(&selection);
  let dropped = report.exclude(&selection);

  assert_eq!(paths(&kept), vec!["metadata.name", "spec.replicas"]);
  assert_eq!(paths(&dropped), vec!["spec.template.labels", "spec.ports[1]", "spec.ports"]);

  assert!(kept.diffs.iter().all(|diff| !dropped.diffs.contains(diff)));
  let merged: Vec<_> = report
    .diffs
    .iter()
    .filter(|diff| kept.diffs.contains(diff) || dropped.diffs.contains(diff))
    .cloned()
    .collect();
  assert_eq!(merged, report.diffs);
  assert_eq!(kept.diffs.len() + dropped.diffs.len(), report.diffs.len());
}

#[test]
fn test_nested_values_must_match_too() {
  let report = deployment_report();

  // spec.template.labels itself is selected, but spec.template.labels.tier is not
  assert!(report.filter(&["spec.template.labels"]).diffs.is_empty());

  let both = report.filter(&["spec.template.labels", "spec.template.labels.tier"]);
  assert_eq!(paths(&both), vec!["spec.template.labels"]);
}

#[test]
fn test_regexp_depth_sensitivity() {
  let report = report(vec![diff(
    "a.b",
    vec![modification(Value::mapping(vec![("c", 1i64.into())]), Value::mapping(vec![("c", 2i64.into())]))]
  )]);

  assert!(report.filter_regexp(&["^a\\.b$"]).unwrap().diffs.is_empty());
  assert_eq!(report.filter_regexp(&["^a\\.b"]).unwrap().diffs.len(), 1);
}

#[test]
fn test_filter_regexp() {
  let report = deployment_report();

  let spec = report.filter_regexp(&["^spec\\."]).unwrap();
  assert_eq!(paths(&spec), vec!["spec.replicas", "spec.template.labels", "spec.ports[1]", "spec.ports"]);

  let no_spec = report.exclude_regexp(&["^spec"]).unwrap();
  assert_eq!(paths(&no_spec), vec!["metadata.name"]);
}

#[test]
fn test_order_change_sub_paths_are_checked() {
  let report = deployment_report();

  // spec.ports matches, but its values contain spec.ports[0] and spec.ports[1]
  assert!(report.filter(&["spec.ports"]).diffs.is_empty());
  assert_eq!(paths(&report.filter(&["spec.ports", "spec.ports[0]", "spec.ports[1]"])), vec![
    "spec.ports[1]",
    "spec.ports"
  ]);
}

#[test]
fn test_invalid_regexp_fails_the_call() {
  let report = deployment_report();

  let err = report.filter_regexp(&["^spec", "(("]).unwrap_err();
  assert!(matches!(err, FilterError::InvalidPattern { ref pattern, .. } if pattern == "(("));
  assert!(err.to_string().contains("(("));

  assert!(report.exclude_regexp(&["[unclosed"]).is_err());
}

#[test]
fn test_malformed_paths_reduce_the_filter_set() {
  let report = deployment_report();

  assert!(report.filter(&["spec..replicas"]).diffs.is_empty());
  assert_eq!(report.exclude(&["spec..replicas"]), report);
  assert_eq!(paths(&report.filter(&["spec..replicas", "spec.replicas"])), vec!["spec.replicas"]);
}

#[test]
fn test_pathless_diffs() {
  let report = report(vec![
    neatdiff::Diff::new(None, vec![Detail::new(Kind::OrderChange, None, None)]),
    diff("x", vec![]),
  ]);

  assert_eq!(paths(&report.filter(&["x"])), vec!["x"]);
  assert_eq!(report.exclude(&["x"]).diffs, vec![report.diffs[0].clone()]);
  assert!(report.filter_regexp(&[".*"]).unwrap().diffs.iter().all(|diff| diff.path.is_some()));
  assert_eq!(report.exclude_regexp(&["^x$"]).unwrap().diffs.len(), 1);
}

#[test]
fn test_ignore_value_changes() {
  let report = deployment_report();
  let result = report.ignore_value_changes();

  assert_eq!(result.from, report.from);
  assert_eq!(result.to, report.to);
  assert_eq!(paths(&result), vec!["spec.template.labels", "spec.ports[1]", "spec.ports"]);
}

#[test]
fn test_ignore_value_changes_single_modification() {
  let report = report(vec![diff("a.b", vec![Detail::new(Kind::Modification, None, None)])]);
  let result = report.ignore_value_changes();

  assert!(result.diffs.is_empty());
  assert_eq!((result.from.as_str(), result.to.as_str()), ("from.yaml", "to.yaml"));
}

#[test]
fn test_ignore_value_changes_only_looks_at_top_level_kinds() {
  let mixed = diff("a", vec![addition(Value::mapping(vec![("x", 1i64.into())])), modification(1i64, 2i64)]);
  let plain = diff("b", vec![removal(Value::mapping(vec![("y", 1i64.into())]))]);
  let report = report(vec![mixed, plain.clone()]);

  assert_eq!(report.ignore_value_changes().diffs, vec![plain]);
}

#[test]
fn test_input_report_is_untouched() {
  let report = deployment_report();
  let before = report.clone();

  let _ = report.filter(&["spec.replicas"]);
  let _ = report.exclude_regexp(&["spec"]).unwrap();
  let _ = report.ignore_value_changes();

  assert_eq!(report, before);
}

#[test]
fn test_filter_with_built_predicate() {
  let report = deployment_report();
  let predicate = predicate::patterns(&["name$", "replicas$"]).unwrap();

  assert_eq!(paths(&filter::filter(&report, &predicate)), vec!["metadata.name", "spec.replicas"]);
  assert_eq!(paths(&report.filter_by(&!predicate)), vec!["spec.template.labels", "spec.ports[1]", "spec.ports"]);
}
