pub mod config;
pub mod filter;
pub mod path;
pub mod render;
pub mod report;
pub mod value;

// Re-exports
pub use filter::{FilterError, PathPredicate};
pub use path::{Path, PathElement, PathError};
pub use render::{render, to_yaml_string, RenderConfig, RenderError};
pub use report::{Detail, Diff, Kind, Report};
pub use value::{Mapping, Scalar, Value};
