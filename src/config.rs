use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{ColorError, ColorSchema, RenderConfig};

// Constants
const DEFAULT_USE_INDENT_LINES: bool = true;
const DEFAULT_BOLD_KEYS: bool = true;
const ENV_PREFIX: &str = "NEATDIFF";

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to load configuration")]
  Load(#[from] config::ConfigError),

  #[error(transparent)]
  Color(#[from] ColorError)
}

/// Renderer preferences as stored in the config file and environment
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Settings {
  pub use_indent_lines: bool,
  pub bold_keys:        bool,
  /// Category name to color, applied on top of the default palette
  #[serde(default)]
  pub colors:           HashMap<String, String>
}

/// `~/.config/neatdiff/config.ini`, if there is a home directory
pub fn default_config_file() -> Option<PathBuf> {
  home::home_dir().map(|home| home.join(".config/neatdiff/config.ini"))
}

impl Settings {
  /// Layers defaults, the INI file and `NEATDIFF_*` environment variables.
  ///
  /// An explicitly given `file` must exist; the default location is optional.
  pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
    let (file, required) = match file {
      Some(file) => (Some(file.to_path_buf()), true),
      None => (default_config_file(), false)
    };

    let mut builder = Config::builder()
      .set_default("use_indent_lines", DEFAULT_USE_INDENT_LINES)?
      .set_default("bold_keys", DEFAULT_BOLD_KEYS)?;

    if let Some(file) = file {
      log::debug!("Reading configuration from {}", file.display());
      builder = builder.add_source(File::new(file.to_string_lossy().as_ref(), FileFormat::Ini).required(required));
    }

    let config = builder
      .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__").try_parsing(true))
      .build()?;

    Ok(config.try_deserialize()?)
  }

  pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
    let mut color_schema = ColorSchema::default();
    color_schema.apply_overrides(&self.colors)?;

    Ok(RenderConfig {
      use_indent_lines: self.use_indent_lines,
      bold_keys: self.bold_keys,
      color_schema
    })
  }
}
