//! Neat, colorized YAML-like output for hierarchical values.
//!
//! The renderer walks a [`Value`] and writes it the way YAML would lay it
//! out, with every key, scalar and indent guide colored by its
//! [`Category`]. Output is buffered per call; nothing is written to a sink
//! until the whole value rendered successfully.
//!
//! Values are trees by construction, so recursion depth is bounded by the
//! nesting depth of the input.

pub mod color;

use std::io::Write;

use colored::Colorize;
use thiserror::Error;

pub use color::{parse_color, Category, ColorError, ColorSchema};

use crate::value::{Mapping, Scalar, Value};

#[derive(Error, Debug)]
pub enum RenderError {
  #[error("Failed to serialize scalar {value:?}")]
  Serialize {
    value:  String,
    #[source]
    source: serde_yaml::Error
  },

  #[error("Failed to write rendered output")]
  Write(#[from] std::io::Error)
}

/// Preferences for one rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
  /// Draw `│` guides instead of plain spaces for each indent level
  pub use_indent_lines: bool,
  pub bold_keys:        bool,
  pub color_schema:     ColorSchema
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      use_indent_lines: true,
      bold_keys:        true,
      color_schema:     ColorSchema::default()
    }
  }
}

impl RenderConfig {
  /// No guides, no emphasis, no colors
  pub fn plain() -> Self {
    Self {
      use_indent_lines: false,
      bold_keys:        false,
      color_schema:     ColorSchema::plain()
    }
  }
}

struct Renderer<'a> {
  config: &'a RenderConfig,
  indent: String,
  out:    String
}

impl<'a> Renderer<'a> {
  fn new(config: &'a RenderConfig) -> Self {
    let unit = if config.use_indent_lines { "│ " } else { "  " };
    let indent = config.color_schema.paint(unit, Category::IndentLine, false);

    Self { config, indent, out: String::new() }
  }

  fn paint(&self, text: &str, category: Category) -> String {
    self.config.color_schema.paint(text, category, false)
  }

  fn nested(&self, prefix: &str) -> String {
    format!("{prefix}{}", self.indent)
  }

  fn value(&mut self, prefix: &str, skip_indent_on_first_line: bool, value: &Value) -> Result<(), RenderError> {
    match value {
      Value::Mapping(mapping) => self.mapping(prefix, skip_indent_on_first_line, mapping),
      Value::Sequence(items) => self.sequence(prefix, items),
      Value::Scalar(scalar) => self.scalar(prefix, scalar)
    }
  }

  fn mapping(&mut self, prefix: &str, skip_indent_on_first_line: bool, mapping: &Mapping) -> Result<(), RenderError> {
    for (i, (key, value)) in mapping.iter().enumerate() {
      if !skip_indent_on_first_line || i > 0 {
        self.out.push_str(prefix);
      }

      let key = self
        .config
        .color_schema
        .paint(&format!("{key}:"), Category::Key, self.config.bold_keys);
      self.out.push_str(&key);

      match value {
        Value::Mapping(inner) if inner.is_empty() => {
          self.out.push(' ');
          self.empty_structure("{}");
        }
        Value::Sequence(items) if items.is_empty() => {
          self.out.push(' ');
          self.empty_structure("[]");
        }
        Value::Mapping(inner) => {
          self.out.push('\n');
          let nested = self.nested(prefix);
          self.mapping(&nested, false, inner)?;
        }
        Value::Sequence(items) => {
          self.out.push('\n');
          self.sequence(prefix, items)?;
        }
        Value::Scalar(scalar) => {
          self.out.push(' ');
          self.scalar(prefix, scalar)?;
        }
      }
    }

    Ok(())
  }

  fn empty_structure(&mut self, marker: &str) {
    let marker = self.paint(marker, Category::EmptyStructures);
    self.out.push_str(&marker);
    self.out.push('\n');
  }

  fn sequence(&mut self, prefix: &str, items: &[Value]) -> Result<(), RenderError> {
    let nested = self.nested(prefix);
    for item in items {
      self.out.push_str(prefix);
      self.out.push_str(&"- ".bold().to_string());
      match item {
        Value::Mapping(inner) if inner.is_empty() => self.empty_structure("{}"),
        Value::Sequence(inner) if inner.is_empty() => self.empty_structure("[]"),
        _ => self.value(&nested, true, item)?
      }
    }

    Ok(())
  }

  fn scalar(&mut self, prefix: &str, scalar: &Scalar) -> Result<(), RenderError> {
    if let Scalar::Null = scalar {
      let null = self.paint("null", Category::Null);
      self.out.push_str(&null);
      self.out.push('\n');
      return Ok(());
    }

    let text = serialize_scalar(scalar)?;
    let lines: Vec<&str> = text.trim_end().split('\n').collect();
    let category = scalar_category(scalar, lines.len());

    for (i, line) in lines.iter().enumerate() {
      if i > 0 {
        self.out.push_str(prefix);
      }
      let line = self.paint(line, category);
      self.out.push_str(&line);
      self.out.push('\n');
    }

    Ok(())
  }
}

fn serialize_scalar(scalar: &Scalar) -> Result<String, RenderError> {
  serde_yaml::to_string(&serde_yaml::Value::from(scalar.clone())).map_err(|source| RenderError::Serialize {
    value: scalar.to_string(),
    source
  })
}

/// The color category of a scalar serialized into `line_count` lines
pub fn scalar_category(scalar: &Scalar, line_count: usize) -> Category {
  if line_count > 1 {
    return Category::MultiLineText;
  }

  match scalar {
    Scalar::Null => Category::Null,
    Scalar::Bool(_) => Category::Bool,
    Scalar::Float(_) => Category::Float,
    Scalar::Int(_) | Scalar::UInt(_) => Category::Int,
    Scalar::String(_) => Category::ScalarDefault
  }
}

/// Renders `value` into a string using `config`
pub fn render(value: &Value, config: &RenderConfig) -> Result<String, RenderError> {
  let mut renderer = Renderer::new(config);
  renderer.value("", false, value)?;
  Ok(renderer.out)
}

/// Renders `value` completely, then writes it to `sink` in one go
pub fn write_to<W: Write>(value: &Value, config: &RenderConfig, sink: &mut W) -> Result<(), RenderError> {
  let text = render(value, config)?;
  sink.write_all(text.as_bytes())?;
  sink.flush()?;
  Ok(())
}

/// Renders `value` with indent guides, bold keys and the default palette
pub fn to_yaml_string(value: &Value) -> Result<String, RenderError> {
  render(value, &RenderConfig::default())
}
