//! Typed error definitions for longpath_move.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Fatal vs recoverable: path resolution and target creation abort the whole
//! run; every other variant is recorded against the offending file and the
//! traversal continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("cannot resolve '{path}' to an absolute path: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create target directory '{path}': {source}")]
    TargetCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("target directory '{target}' lies inside source '{source_base}'")]
    TargetInsideSource {
        source_base: PathBuf,
        target: PathBuf,
    },

    #[error("cannot access '{path}' during walk: {source}")]
    WalkAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copy failed '{src}' -> '{dest}': {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("size mismatch after copy: '{src}' is {expected} bytes, '{dest}' is {actual}")]
    SizeMismatch {
        src: PathBuf,
        dest: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("cannot verify '{path}' after copy: {source}")]
    Verify {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copy verified but original '{path}' could not be removed: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RelocateError {
    /// Stable machine-readable code, used as the `kind` field in logs.
    pub fn code(&self) -> &'static str {
        match self {
            RelocateError::PathResolution { .. } => "path_resolution",
            RelocateError::TargetCreation { .. } => "target_creation",
            RelocateError::TargetInsideSource { .. } => "target_inside_source",
            RelocateError::WalkAccess { .. } => "walk_access",
            RelocateError::Copy { .. } => "copy",
            RelocateError::SizeMismatch { .. } => "size_mismatch",
            RelocateError::Verify { .. } => "verify",
            RelocateError::Delete { .. } => "delete",
        }
    }

    /// Fatal errors abort the run before or during setup; everything else is
    /// recorded per-file and the walk carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RelocateError::PathResolution { .. }
                | RelocateError::TargetCreation { .. }
                | RelocateError::TargetInsideSource { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let e = RelocateError::SizeMismatch {
            src: PathBuf::from("/a"),
            dest: PathBuf::from("/b"),
            expected: 10,
            actual: 9,
        };
        assert_eq!(e.code(), "size_mismatch");
        assert!(!e.is_fatal());

        let e = RelocateError::TargetCreation {
            path: PathBuf::from("/t"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(e.code(), "target_creation");
        assert!(e.is_fatal());
    }

    #[test]
    fn delete_is_recoverable() {
        let e = RelocateError::Delete {
            path: PathBuf::from("/x"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!e.is_fatal());
    }
}
