//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override config-file values; anything still missing is prompted for.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// CLI wrapper for the longpath_move library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move files with over-long absolute paths into a flat directory (Rust)"
)]
pub struct Args {
    /// Root of the tree to scan for over-long paths.
    #[arg(
        long = "source",
        short = 's',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help = "Source directory to scan (prompted for if omitted)"
    )]
    pub source: Option<PathBuf>,

    /// Flat directory that receives relocated files.
    #[arg(
        long = "target",
        short = 't',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help = "Target directory for relocated files (prompted for if omitted)"
    )]
    pub target: Option<PathBuf>,

    /// Absolute-path length threshold in characters.
    #[arg(
        long = "max-length",
        short = 'm',
        value_name = "CHARS",
        help = "Maximum path length in characters (default 180)"
    )]
    pub max_length: Option<usize>,

    /// Dry-run: compute and report the full plan without touching the filesystem.
    #[arg(
        long,
        help = "Show what would be moved, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where longpath_move will look for the config file, then exit.
    #[arg(
        long,
        help = "Print the config file location used by longpath_move and exit"
    )]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source_base = Some(src.clone());
        }
        if let Some(tgt) = &self.target {
            cfg.target_base = Some(tgt.clone());
        }
        if let Some(len) = self.max_length {
            cfg.max_path_len = Some(len);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
