//! The safe-move protocol behind a single interface.
//!
//! The relocation algorithm (walk + resolve + move) is written once and runs
//! identically in both modes; only the `Mover` implementation differs:
//! - `DiskMover` performs copy -> size-verify -> delete-original,
//! - `PlanMover` computes the would-be destination against its registry and
//!   performs no I/O at all.
//!
//! No-loss guarantee: the source file is the single source of truth until the
//! destination has been observed byte-size-equal. Every failure before that
//! point removes the (partial or unverifiable) destination and leaves the
//! source untouched.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::RelocateError;
use crate::report::RunMode;

use super::helpers::io_error_with_help;
use super::io_copy::copy_streaming;
use super::resolve::{resolve_in_registry, resolve_on_disk, NameRegistry};

/// One relocation backend; selected by run mode.
pub trait Mover {
    fn mode(&self) -> RunMode;

    /// Collision-free destination for `file_name` inside the target directory.
    fn resolve(&mut self, file_name: &OsStr) -> PathBuf;

    /// Perform or simulate the move; returns the byte size to record.
    /// `expected` is the size observed during the walk, used as the planned
    /// size in dry-run mode.
    fn transfer(&mut self, src: &Path, dest: &Path, expected: u64)
        -> Result<u64, RelocateError>;
}

/// Real-run backend: probes and mutates the filesystem.
pub struct DiskMover {
    target: PathBuf,
}

impl DiskMover {
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }
}

impl Mover for DiskMover {
    fn mode(&self) -> RunMode {
        RunMode::Real
    }

    fn resolve(&mut self, file_name: &OsStr) -> PathBuf {
        resolve_on_disk(&self.target, file_name)
    }

    fn transfer(
        &mut self,
        src: &Path,
        dest: &Path,
        _expected: u64,
    ) -> Result<u64, RelocateError> {
        if let Err(e) = copy_streaming(src, dest) {
            discard_rejected_copy(dest);
            return Err(RelocateError::Copy {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source: e,
            });
        }

        // Re-stat both sides; a transient stat failure here is reportable,
        // never a silent drop. The unverifiable copy is discarded so the
        // original stays authoritative.
        let src_len = match fs::metadata(src) {
            Ok(m) => m.len(),
            Err(e) => {
                discard_rejected_copy(dest);
                return Err(RelocateError::Verify {
                    path: src.to_path_buf(),
                    source: e,
                });
            }
        };
        let dest_len = match fs::metadata(dest) {
            Ok(m) => m.len(),
            Err(e) => {
                discard_rejected_copy(dest);
                return Err(RelocateError::Verify {
                    path: dest.to_path_buf(),
                    source: e,
                });
            }
        };

        if src_len != dest_len {
            discard_rejected_copy(dest);
            return Err(RelocateError::SizeMismatch {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                expected: src_len,
                actual: dest_len,
            });
        }

        // Only now is the original deleted. If this fails both copies stay
        // on disk; the operator confirms and clears the source by hand.
        fs::remove_file(src)
            .map_err(io_error_with_help("remove original file", src))
            .map_err(|e| RelocateError::Delete {
                path: src.to_path_buf(),
                source: e,
            })?;

        Ok(src_len)
    }
}

/// Best-effort removal of a destination that failed copy or verification.
/// A cleanup failure is logged but never replaces the primary error.
fn discard_rejected_copy(dest: &Path) {
    if let Err(e) = fs::remove_file(dest) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(dest = %dest.display(), error = %e, "could not clean up rejected copy");
        }
    }
}

/// Dry-run backend: pure bookkeeping against a per-run name registry.
pub struct PlanMover {
    target: PathBuf,
    assigned: NameRegistry,
}

impl PlanMover {
    pub fn new(target: PathBuf) -> Self {
        Self {
            target,
            assigned: NameRegistry::new(),
        }
    }

    /// Number of names handed out so far (for tests and diagnostics).
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

impl Mover for PlanMover {
    fn mode(&self) -> RunMode {
        RunMode::DryRun
    }

    fn resolve(&mut self, file_name: &OsStr) -> PathBuf {
        resolve_in_registry(&self.target, file_name, &mut self.assigned)
    }

    fn transfer(
        &mut self,
        _src: &Path,
        _dest: &Path,
        expected: u64,
    ) -> Result<u64, RelocateError> {
        Ok(expected)
    }
}
