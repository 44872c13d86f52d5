//! Config module (modularized).
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, ensure_default_config_exists, merge_config_from_xml, CONFIG_ENV};

/// Threshold applied when neither config, CLI nor prompt supplies one.
pub const DEFAULT_MAX_PATH_LEN: usize = 180;
