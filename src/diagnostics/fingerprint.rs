// src/diagnostics/fingerprint.rs
//! Hash-reduced identity of a diagnostic.
//!
//! A large run can emit gigabytes of diagnostics, most of them repeated
//! from headers included by many translation units. Keeping every
//! diagnostic's text around for deduplication costs roughly two orders of
//! magnitude more memory than keeping this fingerprint: the path and the
//! message lines are reduced to 64-bit digests, only line and column are
//! stored verbatim.
//!
//! The `Hash` impl only covers the source location. Diagnostics at the same
//! location with different text land in the same bucket and are told apart
//! by `Eq`, which compares every component.

use crate::utils::stable_hash;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy)]
pub struct Fingerprint {
    path: u64,
    line: u32,
    column: u32,
    message: u64,
    additional: u64,
    bucket: u64,
}

impl Fingerprint {
    /// Builds a fingerprint from the raw parts of a diagnostic.
    ///
    /// `message` is the first diagnostic line ("severity: text"),
    /// `additional` everything that followed it (notes, code pointers).
    #[must_use]
    pub fn new(path: &str, line: u32, column: u32, message: &str, additional: &str) -> Self {
        let path = stable_hash(path);
        Self {
            path,
            line,
            column,
            message: stable_hash(message),
            additional: stable_hash(additional),
            bucket: location_bucket(path, line, column),
        }
    }

    /// The value fed to the hasher. Depends on the location only.
    #[must_use]
    pub fn bucket(&self) -> u64 {
        self.bucket
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

/// Fixed-order mix of the location components.
fn location_bucket(path: u64, line: u32, column: u32) -> u64 {
    let mut h = path;
    h = h.rotate_left(21) ^ u64::from(line);
    h = h.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    h = h.rotate_left(21) ^ u64::from(column);
    h.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl PartialEq for Fingerprint {
    // Cheapest comparisons first; the bucket is implied by the location.
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.column == other.column
            && self.path == other.path
            && self.message == other.message
            && self.additional == other.additional
    }
}

impl Eq for Fingerprint {}

impl Hash for Fingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.bucket);
    }
}
