//! Duplicate basename resolution.
//!
//! libtool keys archive members by basename, so `a/x.o` and `b/x.o` end up
//! as a single member. When that would happen every input is re-exposed
//! through a symlink whose name embeds a hash of its absolute path.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::Error;

/// Extension given to every generated link.
const LINK_EXTENSION: &str = "o";
/// Bytes of the SHA-256 digest kept in the link name.
const HASH_BYTES: usize = 8;

/// True if two entries share the same final path component.
pub fn has_duplicate_basenames(files: &[String]) -> bool {
    let mut seen = HashSet::new();
    files
        .iter()
        .any(|file| !seen.insert(Path::new(file).file_name().map(|n| n.to_owned())))
}

/// Lowercase hex of the first bytes of SHA-256 over `input`.
pub fn path_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest[..HASH_BYTES]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Link basename for an absolute input path: `<stem>_<hash>.o`.
pub fn link_name(absolute: &Path) -> String {
    let stem = absolute
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "{}_{}.{}",
        stem,
        path_hash(&absolute.to_string_lossy()),
        LINK_EXTENSION
    )
}

/// Create one symlink per input file in `dir`, preserving order.
///
/// Targets are absolute so the links stay valid no matter where the
/// archiver runs from. Returns the link paths.
pub fn create_symlinks(dir: &Path, files: &[String]) -> Result<Vec<PathBuf>, Error> {
    info!(
        files = files.len(),
        dir = %dir.display(),
        "Duplicate basenames in archiver inputs, symlinking"
    );

    let mut links = Vec::with_capacity(files.len());
    for file in files {
        let absolute = std::path::absolute(file).map_err(|source| Error::Io {
            path: PathBuf::from(file),
            source,
        })?;
        let link = dir.join(link_name(&absolute));

        match symlink(&absolute, &link) {
            Ok(()) => {
                debug!(target = %absolute.display(), link = %link.display(), "Created symlink");
            }
            // Same input listed twice resolves to the same link.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists
                && fs::read_link(&link).is_ok_and(|t| t == absolute) => {}
            Err(source) => return Err(Error::Io { path: link, source }),
        }
        links.push(link);
    }
    Ok(links)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detects_shared_basename_across_dirs() {
        assert!(has_duplicate_basenames(&strings(&["a/x.o", "b/x.o"])));
        assert!(has_duplicate_basenames(&strings(&["x.o", "lib/y.o", "x.o"])));
    }

    #[test]
    fn distinct_basenames_are_not_duplicates() {
        assert!(!has_duplicate_basenames(&strings(&["a/x.o", "a/y.o", "x.c"])));
        assert!(!has_duplicate_basenames(&[]));
    }

    #[test]
    fn hash_is_sixteen_hex_chars_and_stable() {
        let h = path_hash("/work/a/x.o");
        assert_eq!(h.len(), 16);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(h, path_hash("/work/a/x.o"));
        assert_ne!(h, path_hash("/work/b/x.o"));
    }

    #[test]
    fn link_name_keeps_stem() {
        let name = link_name(Path::new("/work/a/foo.bar.o"));
        assert!(name.starts_with("foo.bar_"));
        assert!(name.ends_with(".o"));
        assert_eq!(name.len(), "foo.bar_".len() + 16 + ".o".len());
    }
}
