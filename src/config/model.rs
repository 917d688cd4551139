//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for devflow.
///
/// This struct represents the contents of `devflow.yaml` at the project root.
/// The file is optional; unknown fields in the YAML are ignored for forward
/// compatibility and missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Artifact settings
    // =========================================================================
    /// Base name of the built executable (platform extension added on lookup).
    /// Defaults to the project directory name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,

    /// Directory (relative to the project root) holding run configurations.
    #[serde(default = "default_configs_dir")]
    pub configs_dir: String,

    /// Short names accepted by `--config`, mapped to files in `configs_dir`.
    #[serde(default = "default_named_configs")]
    pub named_configs: BTreeMap<String, String>,

    // =========================================================================
    // Toolchain settings
    // =========================================================================
    /// External program names.
    pub tools: ToolNames,

    /// Build-system defines for instrumented variants.
    pub sanitizers: SanitizerDefines,

    // =========================================================================
    // Verification settings
    // =========================================================================
    /// Patterns removed from raw coverage data before rendering.
    #[serde(default = "default_coverage_excludes")]
    pub coverage_excludes: Vec<String>,

    /// Directories handed to static analyzers.
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<String>,

    /// Directories walked by the formatter.
    #[serde(default = "default_format_dirs")]
    pub format_dirs: Vec<String>,

    /// Globs (relative to each walked directory) that identify source files.
    #[serde(default = "default_source_globs")]
    pub source_globs: Vec<String>,

    /// clang-tidy `-checks=` value.
    #[serde(default = "default_tidy_checks")]
    pub tidy_checks: String,

    /// Language standard passed to cppcheck.
    #[serde(default = "default_cppcheck_std")]
    pub cppcheck_std: String,

    // =========================================================================
    // Demo settings
    // =========================================================================
    /// Steps executed by `demo` after the artifact is built.
    #[serde(default = "default_demo_steps")]
    pub demo_steps: Vec<DemoStep>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifact_name: None,
            configs_dir: default_configs_dir(),
            named_configs: default_named_configs(),
            tools: ToolNames::default(),
            sanitizers: SanitizerDefines::default(),
            coverage_excludes: default_coverage_excludes(),
            source_dirs: default_source_dirs(),
            format_dirs: default_format_dirs(),
            source_globs: default_source_globs(),
            tidy_checks: default_tidy_checks(),
            cppcheck_std: default_cppcheck_std(),
            demo_steps: default_demo_steps(),
        }
    }
}
