//! Tests for static analysis and formatting.

use super::*;
use super::format::*;
use super::static_analysis::*;
use crate::error::DevError;
use crate::test_support::{FakeRunner, create_test_project, is_configure, test_context};
use std::path::Path;

fn add_sources(root: &Path) {
    for file in ["lib/src/model.cpp", "lib/include/model.hpp", "cli/src/main.cpp"] {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "int x;\n").unwrap();
    }
}

#[test]
fn test_analyzer_kind_from_program() {
    assert_eq!(AnalyzerKind::from_program("clang-tidy"), Some(AnalyzerKind::ClangTidy));
    assert_eq!(AnalyzerKind::from_program("clang-tidy-18"), Some(AnalyzerKind::ClangTidy));
    assert_eq!(
        AnalyzerKind::from_program("/opt/bin/cppcheck"),
        Some(AnalyzerKind::Cppcheck)
    );
    assert_eq!(AnalyzerKind::from_program("lint"), None);
}

#[test]
fn test_clang_tidy_generates_compilation_database_first() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new();
    let ctx = test_context(temp.path(), &runner);

    let outcome = run_static_analysis(&ctx, AnalysisPolicy::Advisory, false).unwrap();

    assert_eq!(outcome.analyzer.as_deref(), Some("clang-tidy"));
    assert!(!outcome.issues_found());
    let calls = runner.calls();
    assert!(is_configure(&calls[0], "build"));
    assert!(calls[0].has_arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON"));
    // lib/src, lib/include and cli/src hold sources; cli/include does not exist.
    let tidy = runner.calls_to("clang-tidy");
    assert_eq!(tidy.len(), 3);
    assert!(tidy[0].args[0].starts_with("-checks=bugprone-*"));
    assert!(tidy[0].arg_after("-p").is_some_and(|p| p.ends_with("build")));
}

#[test]
fn test_existing_compilation_database_is_reused() {
    let temp = create_test_project();
    add_sources(temp.path());
    std::fs::create_dir_all(temp.path().join("build")).unwrap();
    std::fs::write(temp.path().join("build").join(COMPILE_COMMANDS), "[]").unwrap();
    let runner = FakeRunner::new();
    let ctx = test_context(temp.path(), &runner);

    run_static_analysis(&ctx, AnalysisPolicy::Advisory, false).unwrap();

    assert!(runner.calls_to("cmake").is_empty());
}

#[test]
fn test_advisory_policy_tolerates_issues() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new().fail_when(|inv| inv.program == "clang-tidy", 1);
    let ctx = test_context(temp.path(), &runner);

    let outcome = run_static_analysis(&ctx, AnalysisPolicy::Advisory, false).unwrap();

    assert!(outcome.issues_found());
    // Every directory is still analyzed after the first report.
    assert_eq!(runner.calls_to("clang-tidy").len(), 3);
}

#[test]
fn test_strict_policy_fails_on_issues() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new().fail_when(|inv| inv.program == "clang-tidy", 6);
    let ctx = test_context(temp.path(), &runner);

    let err = run_static_analysis(&ctx, AnalysisPolicy::Strict, false).unwrap_err();
    assert!(matches!(err, DevError::ToolFailed { code: 6, .. }));
}

#[test]
fn test_falls_back_to_cppcheck() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new().without_tool("clang-tidy");
    let ctx = test_context(temp.path(), &runner);

    let outcome = run_static_analysis(&ctx, AnalysisPolicy::Advisory, true).unwrap();

    assert_eq!(outcome.analyzer.as_deref(), Some("cppcheck"));
    let calls = runner.calls_to("cppcheck");
    assert_eq!(calls.len(), 1);
    assert!(calls[0].has_arg("--enable=all"));
    assert!(calls[0].has_arg("--std=c++23"));
    assert!(calls[0].has_arg("--verbose"));
    assert!(runner.calls_to("cmake").is_empty());
}

#[test]
fn test_no_analyzer_is_advisory_warning_or_strict_failure() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new()
        .without_tool("clang-tidy")
        .without_tool("cppcheck");
    let ctx = test_context(temp.path(), &runner);

    let outcome = run_static_analysis(&ctx, AnalysisPolicy::Advisory, false).unwrap();
    assert_eq!(outcome.analyzer, None);

    let err = run_static_analysis(&ctx, AnalysisPolicy::Strict, false).unwrap_err();
    assert!(matches!(err, DevError::ToolMissing { .. }));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_format_in_place() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new();
    let ctx = test_context(temp.path(), &runner);

    let summary = format_sources(&ctx, false).unwrap();

    assert_eq!(summary.checked.len(), 3);
    let calls = runner.calls_to("clang-format");
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.args[0] == "-i"));
}

#[test]
fn test_format_dry_run_lists_without_failing() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new().fail_when(
        |inv| inv.program == "clang-format" && inv.args.last().is_some_and(|a| a.ends_with("main.cpp")),
        1,
    );
    let ctx = test_context(temp.path(), &runner);

    let summary = format_sources(&ctx, true).unwrap();

    assert_eq!(summary.would_reformat, vec![temp.path().join("cli/src/main.cpp")]);
    assert!(runner.calls_to("clang-format").iter().all(|c| c.has_arg("--dry-run")));
}

#[test]
fn test_format_failure_stops() {
    let temp = create_test_project();
    add_sources(temp.path());
    let runner = FakeRunner::new().fail_when(|inv| inv.program == "clang-format", 2);
    let ctx = test_context(temp.path(), &runner);

    let err = format_sources(&ctx, false).unwrap_err();
    assert!(matches!(err, DevError::ToolFailed { code: 2, .. }));
    assert_eq!(runner.calls_to("clang-format").len(), 1);
}

#[test]
fn test_format_without_sources_succeeds() {
    let temp = create_test_project();
    let runner = FakeRunner::new();
    let ctx = test_context(temp.path(), &runner);

    let summary = format_sources(&ctx, false).unwrap();
    assert!(summary.checked.is_empty());
    assert!(runner.calls().is_empty());
}
