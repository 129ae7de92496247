// src/diagnostics/dedup.rs
use super::fingerprint::Fingerprint;
use std::collections::HashSet;

/// Remembers every fingerprint seen so far.
///
/// Grows for the whole lifetime of its owner; there is no eviction.
#[derive(Debug, Default)]
pub struct DiagnosticSet {
    seen: HashSet<Fingerprint>,
}

impl DiagnosticSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records the fingerprint if it was not seen before.
    /// Returns `false` and leaves the set untouched otherwise.
    pub fn insert_and_query(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }

    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.seen.contains(fingerprint)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTRA: &str = "\n      MyCodePiece();\n      ^";

    #[test]
    fn second_insert_is_rejected() {
        let mut set = DiagnosticSet::new();
        let fp = Fingerprint::new(
            "/home/user/project/my_file.h",
            24,
            4,
            "warning: Do not do this thing [warning-category]",
            EXTRA,
        );
        assert!(set.insert_and_query(fp));
        assert!(!set.insert_and_query(fp));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_bucket_different_text_is_new() {
        let mut set = DiagnosticSet::new();
        let a = Fingerprint::new("/p/my_file.h", 24, 4, "warning: a [x]", EXTRA);
        let b = Fingerprint::new("/p/my_file.h", 24, 4, "warning: a [mess-with-equality]", EXTRA);
        assert_eq!(a.bucket(), b.bucket());

        assert!(set.insert_and_query(a));
        assert!(set.insert_and_query(b));
        assert!(!set.insert_and_query(b));
        assert!(!set.insert_and_query(a));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn different_location_is_new() {
        let mut set = DiagnosticSet::new();
        let a = Fingerprint::new("/p/my_file.h", 24, 4, "warning: a", EXTRA);
        let b = Fingerprint::new("/p/mess_with_hash.h", 24, 5, "warning: a", EXTRA);
        assert!(set.insert_and_query(a));
        assert!(set.insert_and_query(b));
        assert!(set.contains(&a));
        assert!(set.contains(&b));
    }
}
