// src/utils.rs
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Reduces a string to a 64-bit digest that is stable across runs,
/// platforms and compiler versions (first eight bytes of its SHA-256).
#[must_use]
pub fn stable_hash(content: &str) -> u64 {
    let digest = Sha256::digest(content.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Joins `file` onto `directory` unless it is already absolute, then removes
/// `.` and `..` components lexically (no filesystem access).
#[must_use]
pub fn make_absolute(file: &Path, directory: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    normalize(&directory.join(file))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
