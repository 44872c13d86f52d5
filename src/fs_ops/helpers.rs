//! I/O helper utilities.
//!
//! Enriches io::Error messages with actionable, platform-aware hints while
//! preserving the original ErrorKind, usable with map_err in io::Result code.
//!
//! Usage:
//!   fs::remove_file(p).map_err(io_error_with_help("remove original file", p))?;

use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" — permission denied; check ownership and write permissions.");
                }
                libc::ENOENT => {
                    msg.push_str(" — path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" — already exists; pick a unique name or remove the target.");
                }
                libc::ENOSPC => {
                    msg.push_str(" — insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" — read-only filesystem; cannot write here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" — filename or path too long; shorten path segments.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            // Common Win32 errors
            match code {
                5 => msg.push_str(" — access denied; check permissions."), // ERROR_ACCESS_DENIED
                2 | 3 => msg.push_str(" — path not found; verify it exists."), // FILE/PATH NOT FOUND
                80 => msg.push_str(" — already exists; pick a unique name."), // ERROR_FILE_EXISTS
                112 => msg.push_str(" — insufficient disk space."),        // ERROR_DISK_FULL
                206 => msg.push_str(" — filename or path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        // Include OS code for diagnostics
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" — permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" — path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" — already exists; remove or choose a unique name.");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that rewraps an io::Error
/// with enriched context while preserving the original ErrorKind.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kind_is_preserved() {
        let p = PathBuf::from("/nope");
        let wrapped =
            io_error_with_help("open file", &p)(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(wrapped.kind(), io::ErrorKind::NotFound);
        assert!(wrapped.to_string().contains("/nope"));
    }
}
