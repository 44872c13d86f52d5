//! Destination-name resolution.
//!
//! Flattening a tree into one directory means colliding base names are the
//! normal case, not the exception. The suffix scheme strips the extension and
//! appends `_1`, `_2`, ... until a free slot is found.
//!
//! Two membership tests exist for the same algorithm:
//! - real runs probe the filesystem, which already reflects earlier moves of
//!   the same run,
//! - dry runs probe a per-run `NameRegistry`, the only source of truth for
//!   names the simulation has already handed out.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Names already assigned within the target directory for the current run.
/// Owned by the dry-run mover; never process-global, so concurrent runs in
/// tests cannot interfere.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<OsString>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as taken. Returns false if it was already assigned.
    pub fn claim(&mut self, name: &OsStr) -> bool {
        self.used.insert(name.to_os_string())
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        self.used.contains(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Build "<stem>_<n>[.ext]" from a base file name.
/// Preserves non-UTF8 names (OsString throughout); dotfiles keep their
/// leading dot and gain the suffix at the end.
fn suffixed(base: &OsStr, n: u32) -> OsString {
    let p = Path::new(base);
    let stem = p
        .file_stem()
        .map(|s| s.to_owned())
        .unwrap_or_else(|| OsStr::new("file").to_owned());
    let ext = p.extension().map(|e| e.to_owned());

    let mut name = OsString::new();
    name.push(&stem);
    name.push(format!("_{n}"));
    if let Some(e) = ext {
        name.push(".");
        name.push(e);
    }
    name
}

/// Real-run resolution: probe the filesystem until a free path is found.
/// Unbounded in principle; terminates at the first free slot.
pub fn resolve_on_disk(target_dir: &Path, file_name: &OsStr) -> PathBuf {
    let candidate = target_dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let alt = target_dir.join(suffixed(file_name, n));
        if !alt.exists() {
            return alt;
        }
        n += 1;
    }
}

/// Dry-run resolution: same algorithm, membership tested against the
/// registry. Every returned name is claimed before the next candidate, so
/// identical base names deterministically receive `name`, `name_1`, ...
/// in walk order.
pub fn resolve_in_registry(
    target_dir: &Path,
    file_name: &OsStr,
    registry: &mut NameRegistry,
) -> PathBuf {
    if registry.claim(file_name) {
        return target_dir.join(file_name);
    }

    let mut n = 1u32;
    loop {
        let alt = suffixed(file_name, n);
        if registry.claim(&alt) {
            return target_dir.join(alt);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn no_collision_returns_requested_name() {
        let td = tempdir().unwrap();
        let dst = resolve_on_disk(td.path(), OsStr::new("file.txt"));
        assert_eq!(dst, td.path().join("file.txt"));
    }

    #[test]
    fn single_collision_gets_suffix_one() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("file.txt"), b"x").unwrap();
        let dst = resolve_on_disk(td.path(), OsStr::new("file.txt"));
        assert_eq!(dst, td.path().join("file_1.txt"));
    }

    #[test]
    fn multiple_collisions_increment_suffix() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("file.txt"), b"1").unwrap();
        fs::write(td.path().join("file_1.txt"), b"2").unwrap();
        fs::write(td.path().join("file_2.txt"), b"3").unwrap();
        let dst = resolve_on_disk(td.path(), OsStr::new("file.txt"));
        assert_eq!(dst, td.path().join("file_3.txt"));
    }

    #[test]
    fn dotfile_suffixing() {
        let td = tempdir().unwrap();
        fs::write(td.path().join(".env"), b"a").unwrap();
        let dst = resolve_on_disk(td.path(), OsStr::new(".env"));
        assert_eq!(dst, td.path().join(".env_1"));
    }

    #[test]
    fn multi_extension_position() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("archive.tar.gz"), b"a").unwrap();
        let dst = resolve_on_disk(td.path(), OsStr::new("archive.tar.gz"));
        assert_eq!(dst, td.path().join("archive.tar_1.gz"));
    }

    #[test]
    fn registry_hands_out_deterministic_sequence() {
        let td = tempdir().unwrap();
        let mut reg = NameRegistry::new();
        let a = resolve_in_registry(td.path(), OsStr::new("a.txt"), &mut reg);
        let b = resolve_in_registry(td.path(), OsStr::new("a.txt"), &mut reg);
        let c = resolve_in_registry(td.path(), OsStr::new("a.txt"), &mut reg);
        assert_eq!(a, td.path().join("a.txt"));
        assert_eq!(b, td.path().join("a_1.txt"));
        assert_eq!(c, td.path().join("a_2.txt"));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn registry_ignores_disk_state() {
        // Dry-run membership is the registry alone; a pre-existing file on
        // disk must not influence the simulated name.
        let td = tempdir().unwrap();
        fs::write(td.path().join("a.txt"), b"existing").unwrap();
        let mut reg = NameRegistry::new();
        let dst = resolve_in_registry(td.path(), OsStr::new("a.txt"), &mut reg);
        assert_eq!(dst, td.path().join("a.txt"));
    }

    #[test]
    fn registries_are_independent_per_run() {
        let td = tempdir().unwrap();
        let mut first = NameRegistry::new();
        let mut second = NameRegistry::new();
        resolve_in_registry(td.path(), OsStr::new("a.txt"), &mut first);
        let dst = resolve_in_registry(td.path(), OsStr::new("a.txt"), &mut second);
        assert_eq!(dst, td.path().join("a.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_suffixing() {
        use std::os::unix::ffi::OsStrExt;
        let td = tempdir().unwrap();
        let raw = [0xff, 0xfe, b'.', b't', b'x', b't'];
        let name = OsStr::from_bytes(&raw);
        let dst = resolve_on_disk(td.path(), name);
        // It should at least return a path inside the target directory.
        assert!(dst.starts_with(td.path()));
    }
}
