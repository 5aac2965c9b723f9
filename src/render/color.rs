//! Semantic color categories and the schema that maps them to terminal colors.

use std::collections::HashMap;
use std::str::FromStr;

use colored::{Color, Colorize};
use maplit::hashmap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
  #[error("Unknown color category: {0}")]
  UnknownCategory(String),

  #[error("Invalid color: {0}")]
  InvalidColor(String)
}

/// What a piece of rendered text represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
  Key,
  IndentLine,
  ScalarDefault,
  Bool,
  Float,
  Int,
  MultiLineText,
  Null,
  EmptyStructures
}

impl Category {
  pub const ALL: [Category; 9] = [
    Category::Key,
    Category::IndentLine,
    Category::ScalarDefault,
    Category::Bool,
    Category::Float,
    Category::Int,
    Category::MultiLineText,
    Category::Null,
    Category::EmptyStructures
  ];

  pub fn name(&self) -> &'static str {
    match self {
      Category::Key => "key",
      Category::IndentLine => "indent-line",
      Category::ScalarDefault => "scalar-default",
      Category::Bool => "boolean",
      Category::Float => "float",
      Category::Int => "integer",
      Category::MultiLineText => "multi-line-text",
      Category::Null => "null",
      Category::EmptyStructures => "empty-structure"
    }
  }
}

impl FromStr for Category {
  type Err = ColorError;

  /// Case-insensitive; `-`, `_` and a trailing `color` are ignored, so
  /// `keyColor`, `key-color` and `key` all name [`Category::Key`]
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized: String = s
      .chars()
      .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
      .collect::<String>()
      .to_lowercase();
    let normalized = normalized.strip_suffix("color").unwrap_or(&normalized);

    match normalized {
      "key" => Ok(Category::Key),
      "indentline" => Ok(Category::IndentLine),
      "scalardefault" => Ok(Category::ScalarDefault),
      "bool" | "boolean" => Ok(Category::Bool),
      "float" => Ok(Category::Float),
      "int" | "integer" => Ok(Category::Int),
      "multilinetext" => Ok(Category::MultiLineText),
      "null" => Ok(Category::Null),
      "emptystructure" | "emptystructures" => Ok(Category::EmptyStructures),
      _ => Err(ColorError::UnknownCategory(s.to_string()))
    }
  }
}

/// Parses `#rrggbb` hex colors and named terminal colors such as `red`
pub fn parse_color(input: &str) -> Result<Color, ColorError> {
  let input = input.trim();

  if let Some(hex) = input.strip_prefix('#') {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ColorError::InvalidColor(input.to_string()));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidColor(input.to_string()));
    return Ok(Color::TrueColor { r: channel(0)?, g: channel(2)?, b: channel(4)? });
  }

  Color::from_str(input).map_err(|_| ColorError::InvalidColor(input.to_string()))
}

/// Maps categories to colors. Categories without a color render as plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSchema {
  colors: HashMap<Category, Color>
}

impl Default for ColorSchema {
  /// Palette loosely based on the Atom editor's
  fn default() -> Self {
    let rgb = |r, g, b| Color::TrueColor { r, g, b };

    Self {
      colors: hashmap! {
        Category::Key => rgb(205, 92, 92),
        Category::IndentLine => rgb(36, 36, 36),
        Category::ScalarDefault => rgb(152, 251, 152),
        Category::Bool => rgb(255, 228, 181),
        Category::Float => rgb(255, 165, 0),
        Category::Int => rgb(147, 112, 219),
        Category::MultiLineText => rgb(127, 255, 212),
        Category::Null => rgb(255, 140, 0),
        Category::EmptyStructures => rgb(238, 232, 170),
      }
    }
  }
}

impl ColorSchema {
  /// A schema without any colors
  pub fn plain() -> Self {
    Self { colors: HashMap::new() }
  }

  pub fn get(&self, category: Category) -> Option<Color> {
    self.colors.get(&category).copied()
  }

  pub fn set(&mut self, category: Category, color: Color) {
    self.colors.insert(category, color);
  }

  /// Overrides colors from `name -> color` pairs as found in configuration
  pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Result<(), ColorError>
  where
    I: IntoIterator<Item = (&'a String, &'a String)>
  {
    for (name, color) in overrides {
      let category = name.parse::<Category>()?;
      self.set(category, parse_color(color)?);
    }

    Ok(())
  }

  pub fn paint(&self, text: &str, category: Category, bold: bool) -> String {
    let styled = match self.get(category) {
      Some(color) => text.color(color),
      None => text.normal()
    };

    if bold {
      styled.bold().to_string()
    } else {
      styled.to_string()
    }
  }
}
