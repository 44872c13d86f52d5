//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template if missing (unless LONGPATH_MOVE_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; path sanity checks happen elsewhere.
//! - A config file is entirely optional: every field can come from the CLI or prompts.

use anyhow::Result;
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::DEFAULT_MAX_PATH_LEN;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "LONGPATH_MOVE_CONFIG";

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
struct XmlConfig {
    #[serde(rename = "source_base")]
    source_base: Option<String>,
    #[serde(rename = "target_base")]
    target_base: Option<String>,
    #[serde(rename = "max_path_length", default, deserialize_with = "de_usize_trimmed_opt")]
    max_path_length: Option<usize>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional usize
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

/// Resolve the config path: LONGPATH_MOVE_CONFIG wins, else the OS default.
pub fn config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Read config from XML and merge it into `cfg` without clobbering values
/// already set. CLI overrides are applied after this runs and win.
///
/// Returns true if a config file was found and parsed.
pub fn merge_config_from_xml(cfg: &mut Config) -> bool {
    let Some(cfg_path) = config_path() else {
        return false;
    };
    if !cfg_path.exists() {
        return false;
    }

    let Ok(content) = fs::read_to_string(&cfg_path) else {
        return false;
    };
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            debug!(
                "Failed to parse config.xml at {}: {}",
                cfg_path.display(),
                e
            );
            return false;
        }
    };

    if cfg.source_base.is_none() {
        cfg.source_base = parsed
            .source_base
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
    }
    if cfg.target_base.is_none() {
        cfg.target_base = parsed
            .target_base
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
    }
    if cfg.max_path_len.is_none() {
        cfg.max_path_len = parsed.max_path_length;
    }
    if let Some(lvl) = parsed
        .log_level
        .as_deref()
        .and_then(|s| LogLevel::parse(s.trim()))
    {
        cfg.log_level = lvl;
    }
    if cfg.log_file.is_none() {
        cfg.log_file = parsed
            .log_file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
    }

    debug!("Merged config from {}", cfg_path.display());
    true
}

/// Create the default template config file and parent directory.
///
/// On Unix this sets conservative permissions (0o700 dir, 0o600 file) and
/// refuses to write through a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/longpath_move.log".into());

    let content = format!(
        "<!--\n  longpath_move configuration (XML)\n\n  Fields:\n    source_base      -> root of the tree to scan for over-long paths\n    target_base      -> flat directory that receives relocated files\n    max_path_length  -> absolute-path length threshold in characters\n    log_level        -> quiet | normal | info | debug\n    log_file         -> path to log file (optional; stdout is always used)\n\n  Notes:\n    - CLI flags override XML values; missing values are prompted for.\n-->\n<config>\n  <source_base></source_base>\n  <target_base></target_base>\n  <max_path_length>{}</max_path_length>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        DEFAULT_MAX_PATH_LEN, suggested_log
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create the default config if LONGPATH_MOVE_CONFIG is not set and none
/// exists yet; return the created path so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        return None;
    }

    let cfg_path = default_config_path()?;
    if cfg_path.exists() {
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            debug!("Could not create template config: {e}");
            None
        }
    }
}
