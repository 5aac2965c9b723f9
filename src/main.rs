use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dotenv::dotenv;
use log::{debug, LevelFilter};
use neatdiff::config::Settings;
use neatdiff::render::{render, RenderConfig};
use neatdiff::report::{Kind, Report};
use neatdiff::value::Value;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Narrow a structural diff report by path and print it as neat YAML")]
struct Cli {
  #[clap(help = "Report file (YAML or JSON)")]
  report: PathBuf,

  #[clap(long, help = "Only show differences at this path (repeatable)")]
  filter: Vec<String>,

  #[clap(long, help = "Hide differences at this path (repeatable)")]
  exclude: Vec<String>,

  #[clap(long, help = "Only show differences whose path matches this regular expression (repeatable)")]
  filter_regexp: Vec<String>,

  #[clap(long, help = "Hide differences whose path matches this regular expression (repeatable)")]
  exclude_regexp: Vec<String>,

  #[clap(long, help = "Hide differences that change a value", default_value = "false")]
  ignore_value_changes: bool,

  #[clap(long, help = "Indent with spaces instead of guide lines", default_value = "false")]
  no_indent_lines: bool,

  #[clap(long, help = "Do not emphasize mapping keys", default_value = "false")]
  no_bold_keys: bool,

  #[clap(long, help = "Configuration file (INI)")]
  config: Option<PathBuf>,

  #[clap(short, long, help = "Enables verbose logging", default_value = "false")]
  verbose: bool
}

fn narrow(report: Report, cli: &Cli) -> Result<Report> {
  let mut report = report.filter(cli.filter.as_slice()).exclude(cli.exclude.as_slice());
  report = report
    .filter_regexp(cli.filter_regexp.as_slice())
    .context("Failed to apply --filter-regexp")?;
  report = report
    .exclude_regexp(cli.exclude_regexp.as_slice())
    .context("Failed to apply --exclude-regexp")?;

  if cli.ignore_value_changes {
    report = report.ignore_value_changes();
  }

  Ok(report)
}

fn kind_marker(kind: Kind) -> ColoredString {
  let marker = format!("{} {}", kind.symbol(), kind.label());
  match kind {
    Kind::Addition => marker.green(),
    Kind::Removal => marker.red(),
    Kind::Modification => marker.yellow(),
    Kind::OrderChange => marker.blue()
  }
}

fn print_value(out: &mut impl Write, label: &str, value: &Value, config: &RenderConfig) -> Result<()> {
  let text = render(value, config).with_context(|| format!("Failed to render {label} value"))?;
  writeln!(out, "    {}", format!("{label}:").dimmed())?;
  for line in text.lines() {
    writeln!(out, "      {line}")?;
  }
  Ok(())
}

fn print_report(report: &Report, config: &RenderConfig) -> Result<()> {
  // Nothing reaches stdout until every value has rendered
  let mut buffer = Vec::new();

  writeln!(buffer, "{} {} {}", report.from.bold(), "→".dimmed(), report.to.bold())?;
  if report.diffs.is_empty() {
    writeln!(buffer, "{}", "no differences".dimmed())?;
  }

  for diff in &report.diffs {
    let path = diff
      .path
      .as_ref()
      .map(ToString::to_string)
      .unwrap_or_else(|| "(no path)".to_string());

    writeln!(buffer)?;
    writeln!(buffer, "{}", path.bold())?;
    for detail in &diff.details {
      writeln!(buffer, "  {}", kind_marker(detail.kind))?;
      if let Some(from) = &detail.from {
        print_value(&mut buffer, "from", from, config)?;
      }
      if let Some(to) = &detail.to {
        print_value(&mut buffer, "to", to, config)?;
      }
    }
  }

  let mut stdout = io::stdout().lock();
  stdout.write_all(&buffer)?;
  stdout.flush()?;
  Ok(())
}

fn main() -> Result<()> {
  dotenv().ok();

  let cli = Cli::parse();

  if cli.verbose {
    env_logger::builder()
      .filter_level(LevelFilter::Debug)
      .format_target(false)
      .init();
    debug!("Verbose logging enabled");
  }

  let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
  let mut config = settings
    .render_config()
    .context("Invalid color configuration")?;
  if cli.no_indent_lines {
    config.use_indent_lines = false;
  }
  if cli.no_bold_keys {
    config.bold_keys = false;
  }

  let input = fs::read_to_string(&cli.report).with_context(|| format!("Failed to read report {}", cli.report.display()))?;
  let report = Report::from_yaml(&input).with_context(|| format!("Failed to parse report {}", cli.report.display()))?;
  debug!("Loaded {} diff(s) from {}", report.diffs.len(), cli.report.display());

  let report = narrow(report, &cli)?;
  print_report(&report, &config)
}
