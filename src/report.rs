//! Run results and the end-of-run summary.
//!
//! The relocator accumulates immutable `MoveRecord`s and `MoveFailure`s in
//! walk order; nothing here persists beyond one invocation. The reporter is
//! the only place byte counts are rendered human-readable.

use byte_unit::{Byte, UnitType};
use std::path::PathBuf;

use crate::errors::RelocateError;
use crate::output as out;

/// Whether the run mutates the filesystem or only plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Real,
    DryRun,
}

impl RunMode {
    pub fn is_dry_run(self) -> bool {
        matches!(self, RunMode::DryRun)
    }
}

/// One finalized relocation (executed, or planned in dry-run mode).
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub original_path: PathBuf,
    pub new_path: PathBuf,
    pub file_size: u64,
}

/// One abandoned candidate with the error that stopped it.
#[derive(Debug)]
pub struct MoveFailure {
    pub path: PathBuf,
    pub error: RelocateError,
}

/// Everything a single run produced, in walk order.
#[derive(Debug)]
pub struct RunReport {
    pub mode: RunMode,
    pub source: PathBuf,
    pub target: PathBuf,
    pub max_path_len: usize,
    pub moves: Vec<MoveRecord>,
    pub failures: Vec<MoveFailure>,
}

impl RunReport {
    pub fn new(mode: RunMode, source: PathBuf, target: PathBuf, max_path_len: usize) -> Self {
        Self {
            mode,
            source,
            target,
            max_path_len,
            moves: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Cumulative size of all recorded moves.
    pub fn total_bytes(&self) -> u64 {
        self.moves.iter().map(|m| m.file_size).sum()
    }
}

/// Render a byte count with a binary unit, e.g. "1.21 MiB".
pub fn human_size(bytes: u64) -> String {
    format!(
        "{:.2}",
        Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary)
    )
}

/// Print the end-of-run summary: mode banner, resolved paths, threshold,
/// per-file listing, totals and the itemized error list.
pub fn print_summary(report: &RunReport) {
    let mode_banner = match report.mode {
        RunMode::DryRun => "DRY RUN (no files will be moved)",
        RunMode::Real => "ACTUAL RUN",
    };
    out::print_user("");
    out::print_user(&format!("Mode: {}", mode_banner));
    out::print_user(&format!("Source directory: {}", report.source.display()));
    out::print_user(&format!("Target directory: {}", report.target.display()));
    out::print_user(&format!("Maximum path length: {}", report.max_path_len));

    out::print_user("");
    out::print_user(&format!(
        "Found {} files with paths longer than {} characters",
        report.moves.len(),
        report.max_path_len
    ));

    if !report.moves.is_empty() {
        out::print_user("");
        let heading = match report.mode {
            RunMode::DryRun => "Files to be moved:",
            RunMode::Real => "Files moved:",
        };
        out::print_heading(heading);
        for rec in &report.moves {
            out::print_user("");
            out::print_user(&format!("From: {}", rec.original_path.display()));
            out::print_user(&format!("To: {}", rec.new_path.display()));
            out::print_user(&format!("Size: {}", human_size(rec.file_size)));
        }
        out::print_user("");
        out::print_user(&format!("Total size: {}", human_size(report.total_bytes())));
    }

    if !report.failures.is_empty() {
        out::print_user("");
        out::print_error(&format!("Encountered {} errors:", report.failures.len()));
        for failure in &report.failures {
            out::print_error(&format!(
                "File: {}\nError: {}",
                failure.path.display(),
                failure.error
            ));
        }
    }

    if report.mode.is_dry_run() {
        out::print_user("");
        out::print_info("This was a dry run - no files were actually moved.");
        out::print_info("Run without --dry-run to perform the actual move operation.");
    }
}
