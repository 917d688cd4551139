//! Configuration types and defaults for devflow.
//!
//! This module defines the nested config sections and the default value
//! functions used by the Config struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names of the external programs devflow drives.
///
/// Each entry is looked up on PATH at the moment it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolNames {
    /// Native build system front end (configure + compile).
    pub build: String,
    /// Test harness driving the project's registered tests.
    pub test_harness: String,
    /// Fast build backend preferred on Unix-like platforms when present.
    pub fast_backend: String,
    /// Coverage data collector.
    pub coverage_collector: String,
    /// Coverage HTML renderer.
    pub coverage_renderer: String,
    /// API documentation generator.
    pub doc_generator: String,
    /// Source formatter.
    pub formatter: String,
    /// Static analyzers in order of preference.
    pub analyzers: Vec<String>,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            build: "cmake".to_string(),
            test_harness: "ctest".to_string(),
            fast_backend: "ninja".to_string(),
            coverage_collector: "lcov".to_string(),
            coverage_renderer: "genhtml".to_string(),
            doc_generator: "doxygen".to_string(),
            formatter: "clang-format".to_string(),
            analyzers: vec!["clang-tidy".to_string(), "cppcheck".to_string()],
        }
    }
}

/// Build-system defines that switch on instrumentation for isolated variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerDefines {
    pub address: String,
    pub undefined_behavior: String,
    pub coverage: String,
}

impl Default for SanitizerDefines {
    fn default() -> Self {
        Self {
            address: "ENABLE_ASAN".to_string(),
            undefined_behavior: "ENABLE_UBSAN".to_string(),
            coverage: "ENABLE_COVERAGE".to_string(),
        }
    }
}

/// One scripted invocation of the built artifact during `demo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoStep {
    /// Heading printed before the step runs.
    pub title: String,

    /// Arguments passed to the artifact, split with shell quoting rules.
    pub command: String,

    /// Text written to the artifact's stdin (e.g. to confirm a prompt).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,

    /// Inline configuration written to a temporary file for this step only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl DemoStep {
    pub fn new(title: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            command: command.into(),
            ..Default::default()
        }
    }
}

/// Default run-configuration short names.
pub fn default_named_configs() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("default".to_string(), "default.conf".to_string()),
        ("fast".to_string(), "fast_model.conf".to_string()),
        ("accurate".to_string(), "accurate_model.conf".to_string()),
        ("production".to_string(), "production_model.conf".to_string()),
    ])
}

/// Default patterns removed from raw coverage data.
pub fn default_coverage_excludes() -> Vec<String> {
    vec![
        "/usr/*".to_string(),
        "*/tests/*".to_string(),
        "*/googletest/*".to_string(),
    ]
}

/// Default directories handed to the static analyzers.
pub fn default_source_dirs() -> Vec<String> {
    vec![
        "lib/src".to_string(),
        "lib/include".to_string(),
        "cli/src".to_string(),
        "cli/include".to_string(),
    ]
}

/// Default directories walked by the formatter.
pub fn default_format_dirs() -> Vec<String> {
    vec!["lib".to_string(), "cli".to_string()]
}

/// Default globs identifying C/C++ sources.
pub fn default_source_globs() -> Vec<String> {
    vec![
        "**/*.cpp".to_string(),
        "**/*.hpp".to_string(),
        "**/*.h".to_string(),
        "**/*.cc".to_string(),
        "**/*.c".to_string(),
    ]
}

/// Default clang-tidy check selection.
pub fn default_tidy_checks() -> String {
    [
        "bugprone-*",
        "cppcoreguidelines-*",
        "performance-*",
        "portability-*",
        "readability-*",
        "-cppcoreguidelines-pro-bounds-pointer-arithmetic",
        "-cppcoreguidelines-avoid-magic-numbers",
        "-readability-magic-numbers",
    ]
    .join(",")
}

/// Default demo script.
pub fn default_demo_steps() -> Vec<DemoStep> {
    vec![
        DemoStep::new("Project information", "version"),
        DemoStep::new("Available configurations", "config list"),
    ]
}

pub(super) fn default_configs_dir() -> String {
    "configs".to_string()
}

pub(super) fn default_cppcheck_std() -> String {
    "c++23".to_string()
}
