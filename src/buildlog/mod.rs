// src/buildlog/mod.rs
//! Analysis of saved runner logs: enabled checks plus per-check findings
//! with total and unique counts.

pub mod diagnostic;
pub mod finding;
pub mod findings;
pub mod parser;

pub use diagnostic::{CheckDiagnostic, Severity};
pub use finding::Finding;
pub use findings::Findings;
pub use parser::BuildLogParser;
