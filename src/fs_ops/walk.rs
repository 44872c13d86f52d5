//! Tree walker and run orchestrator.
//!
//! Walks the source tree in sorted order, applies the length predicate and
//! drives the selected `Mover` per qualifying file. Each candidate produces
//! an explicit `Outcome`; a recoverable failure is recorded and the walk
//! continues, so one bad entry never aborts the run.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::errors::RelocateError;
use crate::report::{MoveFailure, MoveRecord, RunMode, RunReport};

use super::mover::{DiskMover, Mover, PlanMover};

/// Fully-resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source: PathBuf,
    pub target: PathBuf,
    pub max_path_len: usize,
    pub mode: RunMode,
}

impl RunOptions {
    /// Build run options from a merged configuration. Fails if prompts or
    /// flags left source/target unset.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let source = cfg
            .source_base
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no source directory configured"))?;
        let target = cfg
            .target_base
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no target directory configured"))?;
        Ok(Self {
            source,
            target,
            max_path_len: cfg.effective_max_path_len(),
            mode: if cfg.dry_run {
                RunMode::DryRun
            } else {
                RunMode::Real
            },
        })
    }
}

/// Length of a path in characters of its lossy rendering.
pub fn path_length(path: &Path) -> usize {
    path.to_string_lossy().chars().count()
}

/// Per-candidate result consumed by the orchestrator loop.
enum Outcome {
    Moved(MoveRecord),
    Failed(MoveFailure),
    Skipped,
}

/// Make a path absolute without requiring it to exist (the dry-run target
/// may not). Relative paths are anchored at the current directory.
fn absolutize(path: &Path) -> Result<PathBuf, RelocateError> {
    if path.is_absolute() {
        return Ok(dunce::simplified(path).to_path_buf());
    }
    let cwd = env::current_dir().map_err(|e| RelocateError::PathResolution {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(dunce::simplified(&cwd.join(path)).to_path_buf())
}

/// Walk `source`, relocating (or planning, in dry-run mode) every file whose
/// absolute path exceeds the threshold. Returns the full run report.
///
/// Fatal errors (path resolution, target creation, target nested in source)
/// abort before any file is touched; every per-file failure is recorded and
/// the traversal continues.
pub fn relocate_long_paths(opts: &RunOptions) -> Result<RunReport, RelocateError> {
    let source = absolutize(&opts.source)?;
    let target = absolutize(&opts.target)?;

    // Placing the target under the source would let the walker re-encounter
    // files it just relocated.
    if target.starts_with(&source) {
        return Err(RelocateError::TargetInsideSource {
            source_base: source,
            target,
        });
    }

    let mut report = RunReport::new(opts.mode, source.clone(), target.clone(), opts.max_path_len);

    let mut mover: Box<dyn Mover> = match opts.mode {
        RunMode::Real => {
            fs::create_dir_all(&target).map_err(|e| RelocateError::TargetCreation {
                path: target.clone(),
                source: e,
            })?;
            Box::new(DiskMover::new(target.clone()))
        }
        RunMode::DryRun => Box::new(PlanMover::new(target.clone())),
    };

    let mode_label = if opts.mode.is_dry_run() { "dry-run" } else { "real" };
    info!(
        mode = mode_label,
        source = %source.display(),
        target = %target.display(),
        max_len = opts.max_path_len,
        "starting relocation walk"
    );

    // sort_by_file_name keeps walk order (and with it collision numbering)
    // deterministic across modes and runs.
    for entry in WalkDir::new(&source).sort_by_file_name() {
        let outcome = match entry {
            Ok(entry) => process_entry(&entry, opts.max_path_len, mover.as_mut()),
            Err(err) => walk_failure(&source, err),
        };
        match outcome {
            Outcome::Moved(rec) => {
                if opts.mode.is_dry_run() {
                    info!(src = %rec.original_path.display(), dest = %rec.new_path.display(), "dry-run: would move file");
                } else {
                    info!(src = %rec.original_path.display(), dest = %rec.new_path.display(), "moved file");
                }
                report.moves.push(rec);
            }
            Outcome::Failed(failure) => {
                warn!(
                    code = failure.error.code(),
                    path = %failure.path.display(),
                    error = %failure.error,
                    "candidate abandoned"
                );
                report.failures.push(failure);
            }
            Outcome::Skipped => {}
        }
    }

    Ok(report)
}

fn walk_failure(source: &Path, err: walkdir::Error) -> Outcome {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| source.to_path_buf());
    let msg = err.to_string();
    let io_err = err.into_io_error().unwrap_or_else(|| io::Error::other(msg));
    Outcome::Failed(MoveFailure {
        path: path.clone(),
        error: RelocateError::WalkAccess {
            path,
            source: io_err,
        },
    })
}

fn process_entry(entry: &DirEntry, max_len: usize, mover: &mut dyn Mover) -> Outcome {
    // Directories are never candidates; symlinks are left where they are.
    if !entry.file_type().is_file() {
        return Outcome::Skipped;
    }

    let path = entry.path();
    if path_length(path) <= max_len {
        return Outcome::Skipped;
    }

    let size = match entry.metadata() {
        Ok(m) => m.len(),
        Err(err) => {
            let msg = err.to_string();
            let io_err = err.into_io_error().unwrap_or_else(|| io::Error::other(msg));
            return Outcome::Failed(MoveFailure {
                path: path.to_path_buf(),
                error: RelocateError::WalkAccess {
                    path: path.to_path_buf(),
                    source: io_err,
                },
            });
        }
    };

    let Some(file_name) = path.file_name() else {
        debug!(path = %path.display(), "file entry without a name, skipping");
        return Outcome::Skipped;
    };

    let dest = mover.resolve(file_name);
    match mover.transfer(path, &dest, size) {
        Ok(file_size) => Outcome::Moved(MoveRecord {
            original_path: path.to_path_buf(),
            new_path: dest,
            file_size,
        }),
        Err(error) => Outcome::Failed(MoveFailure {
            path: path.to_path_buf(),
            error,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_length_counts_characters_not_bytes() {
        assert_eq!(path_length(Path::new("/ab")), 3);
        // U+00E9 is two bytes in UTF-8 but one character.
        assert_eq!(path_length(Path::new("/é")), 2);
    }

    #[test]
    fn target_inside_source_is_fatal() {
        let opts = RunOptions {
            source: PathBuf::from("/data/deep"),
            target: PathBuf::from("/data/deep/flat"),
            max_path_len: 180,
            mode: RunMode::DryRun,
        };
        let err = relocate_long_paths(&opts).unwrap_err();
        assert_eq!(err.code(), "target_inside_source");
        assert!(err.is_fatal());
    }

    #[test]
    fn missing_source_is_recorded_not_fatal() {
        let opts = RunOptions {
            source: PathBuf::from("/definitely/not/here"),
            target: PathBuf::from("/tmp/flat-plan"),
            max_path_len: 180,
            mode: RunMode::DryRun,
        };
        let report = relocate_long_paths(&opts).unwrap();
        assert!(report.moves.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].error.code(), "walk_access");
    }
}
