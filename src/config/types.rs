//! Core configuration types.
//! - Config holds runtime settings; source/target stay unset until the CLI,
//!   the XML file or the interactive prompts supply them.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::DEFAULT_MAX_PATH_LEN;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the relocator.
///
/// `source_base`/`target_base`/`max_path_len` are optional here: the app
/// prompts for whatever remains unset after the XML file and CLI flags have
/// been merged.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Root of the tree to scan for over-long paths
    pub source_base: Option<PathBuf>,
    /// Flat directory that receives relocated files
    pub target_base: Option<PathBuf>,
    /// Absolute-path length threshold in characters
    pub max_path_len: Option<usize>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, plan and report but do not modify the filesystem
    pub dry_run: bool,
}

impl Config {
    /// Effective threshold: configured value or the 180-character default.
    pub fn effective_max_path_len(&self) -> usize {
        self.max_path_len.unwrap_or(DEFAULT_MAX_PATH_LEN)
    }
}
