// tests/unit_build_log.rs
use std::fs;
use tidyrun_core::buildlog::{BuildLogParser, Severity};

const PREAMBLE: &str = "Enabled checks:\n    check-a\n    check-b\n\n";

const USE_AFTER_MOVE: &str = "\
/src/file.cpp:62:14: warning: 'x' used after it was moved [check-a]
  use(x);
      ^
/src/file.cpp:60:3: note: move occurred here
  take(std::move(x));
  ^
";

#[test]
fn test_enabled_checks_and_counts() {
    let log = format!("{PREAMBLE}{USE_AFTER_MOVE}{USE_AFTER_MOVE}2 warnings generated.\n");
    let mut p = BuildLogParser::new();
    p.parse(&log);

    assert_eq!(p.enabled_checks(), ["check-a", "check-b"]);
    let findings = p.findings();
    assert_eq!(findings.total_count(Some("check-a")), 2);
    assert_eq!(findings.unique_count(Some("check-a")), 1);
    assert_eq!(findings.total_count(Some("check-b")), 0);
}

#[test]
fn test_note_attaches_to_finding() {
    let mut p = BuildLogParser::new();
    p.parse(&format!("{PREAMBLE}{USE_AFTER_MOVE}"));

    let all = p.findings().all("check-a");
    assert_eq!(all.len(), 1);
    let diags = all[0].diagnostics();
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].check(), Some("check-a"));
    assert_eq!(diags[1].severity(), Severity::Note);
    assert_eq!(diags[1].location(), "/src/file.cpp:60:3");
    assert_eq!(diags[1].message(), "move occurred here");
}

#[test]
fn test_noise_only_log_has_no_findings() {
    let log = format!(
        "{PREAMBLE}Suppressed 12 warnings (12 in non-user code).\n\
         Use -header-filter=.* to display errors from all non-system headers.\n\
         3 warnings generated.\n"
    );
    let mut p = BuildLogParser::new();
    p.parse(&log);
    assert!(p.findings().is_empty());
    assert_eq!(p.findings().total_count(None), 0);
}

#[test]
fn test_applying_fixes_ends_log() {
    let log = format!(
        "{PREAMBLE}/a.cpp:1:1: warning: w [check-b]\nApplying fixes ...\n\
         /b.cpp:2:2: warning: ignored [check-b]\n"
    );
    let mut p = BuildLogParser::new();
    p.parse(&log);
    assert_eq!(p.findings().total_count(Some("check-b")), 1);
}

#[test]
fn test_parse_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("build.log");
    fs::write(&path, format!("{PREAMBLE}{USE_AFTER_MOVE}")).unwrap();

    let mut p = BuildLogParser::new();
    p.parse_file(&path).unwrap();
    assert_eq!(p.into_findings().unique_count(None), 1);
}

#[test]
fn test_missing_file_is_error() {
    let d = tempfile::tempdir().unwrap();
    let mut p = BuildLogParser::new();
    assert!(p.parse_file(&d.path().join("nope.log")).is_err());
}

#[test]
fn test_note_is_not_registered_on_its_own() {
    let mut p = BuildLogParser::new();
    p.parse(&format!("{PREAMBLE}{USE_AFTER_MOVE}"));

    let findings = p.findings();
    assert_eq!(findings.total_count(None), 1);
    assert_eq!(findings.unique_count(None), 1);
    assert_eq!(findings.checks().collect::<Vec<_>>(), vec!["check-a"]);
    assert_eq!(findings.all("check-a")[0].diagnostics().len(), 2);
}

#[test]
fn test_duplicate_reopened_after_noise() {
    let log = "Enabled checks:\ncheck-a\ncheck-b\n\n\
               /src/x.cpp:4:2: warning: shadowed variable [check-a]\n\
               1 warnings generated.\n\
               /src/x.cpp:4:2: warning: shadowed variable [check-a]\n\
               1 warnings generated.\n";
    let mut p = BuildLogParser::new();
    p.parse(log);

    assert_eq!(p.enabled_checks(), ["check-a", "check-b"]);
    assert_eq!(p.findings().total_count(Some("check-a")), 2);
    assert_eq!(p.findings().unique_count(Some("check-a")), 1);
}
