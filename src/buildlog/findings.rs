// src/buildlog/findings.rs
use super::finding::Finding;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Default)]
struct CheckEntry {
    total: usize,
    unique: HashSet<Finding>,
}

/// Registry of findings grouped by check name.
///
/// Every registration bumps the check's total; the unique set only grows
/// when the finding's text was not registered for that check before.
#[derive(Debug, Default)]
pub struct Findings {
    by_check: BTreeMap<String, CheckEntry>,
}

impl Findings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, check_name: &str, finding: Finding) {
        let entry = self.by_check.entry(check_name.to_string()).or_default();
        entry.total += 1;
        entry.unique.insert(finding);
    }

    /// Total registrations for `check_name`, or for all checks when `None`.
    /// Unknown checks count as zero.
    #[must_use]
    pub fn total_count(&self, check_name: Option<&str>) -> usize {
        match check_name {
            Some(name) => self.by_check.get(name).map_or(0, |e| e.total),
            None => self.by_check.values().map(|e| e.total).sum(),
        }
    }

    /// Distinct findings for `check_name`, or summed over all checks.
    #[must_use]
    pub fn unique_count(&self, check_name: Option<&str>) -> usize {
        match check_name {
            Some(name) => self.by_check.get(name).map_or(0, |e| e.unique.len()),
            None => self.by_check.values().map(|e| e.unique.len()).sum(),
        }
    }

    /// Unique findings of a check, sorted. Empty for unknown checks.
    #[must_use]
    pub fn all(&self, check_name: &str) -> Vec<&Finding> {
        let mut findings: Vec<&Finding> = self
            .findings_for_check(check_name)
            .map(|set| set.iter().collect())
            .unwrap_or_default();
        findings.sort();
        findings
    }

    #[must_use]
    pub fn findings_for_check(&self, check_name: &str) -> Option<&HashSet<Finding>> {
        self.by_check.get(check_name).map(|e| &e.unique)
    }

    /// Checks with at least one registered finding, in name order.
    pub fn checks(&self) -> impl Iterator<Item = &str> {
        self.by_check.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_check.is_empty()
    }
}
