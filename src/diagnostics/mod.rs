// src/diagnostics/mod.rs
//! Parsing and deduplication of a single clang-tidy invocation's output.
//!
//! - `fingerprint`: hash-reduced identity of a diagnostic
//! - `record`: the diagnostic accumulated while parsing
//! - `dedup`: set of fingerprints answering "seen before?"
//! - `parser`: line-oriented state machine tying them together

pub mod dedup;
pub mod fingerprint;
pub mod parser;
pub mod record;

pub use dedup::DiagnosticSet;
pub use fingerprint::Fingerprint;
pub use parser::TidyOutputParser;
pub use record::Diagnostic;
