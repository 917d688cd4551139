//! Project and execution context resolution for devflow.
//!
//! This module provides the "environment resolution" layer: it finds the
//! project root (the nearest directory holding `CMakeLists.txt`) and names
//! every well-known path below it. The resolved layout, the target platform,
//! the loaded configuration and the process runner travel together as a
//! [`DevContext`] that is passed explicitly to every command handler.
//!
//! Only `main` consults the process working directory (through
//! [`ProjectLayout::discover`]); everything downstream works from the context.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{DevError, Result};
use crate::process::ProcessRunner;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File that marks the project root.
pub const PROJECT_MARKER: &str = "CMakeLists.txt";

/// Directory for trained models and other generated artifacts.
pub const MODELS_DIR: &str = "models";

/// Directory for results and run logs.
pub const RESULTS_DIR: &str = "results";

/// Version string shown when `CMakeLists.txt` declares none.
pub const UNKNOWN_VERSION: &str = "Unknown";

static PROJECT_VERSION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"project\s*\(\s*\w+\s+VERSION\s+([0-9.]+)").ok());

/// The platform whose conventions drive artifact naming and generator choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Artifacts carry `.exe` and multi-config generators nest them by build type.
    Windows,
    /// Artifacts have no extension and land in a single flat output directory.
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// File name of an artifact called `base` on this platform.
    pub fn executable_name(self, base: &str) -> String {
        match self {
            Platform::Windows => format!("{}.exe", base),
            Platform::Unix => base.to_string(),
        }
    }

    /// Whether build output is organized into per-configuration subdirectories.
    pub fn organizes_by_configuration(self) -> bool {
        matches!(self, Platform::Windows)
    }
}

/// Resolved paths for a devflow project.
///
/// All paths are absolute when the layout came from [`ProjectLayout::discover`].
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Directory containing the top-level `CMakeLists.txt`.
    pub root: PathBuf,
}

impl ProjectLayout {
    /// Discover the project from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(ProjectLayout)` - The nearest ancestor holding `CMakeLists.txt`
    /// * `Err(DevError::UserError)` - If no ancestor is a project root
    pub fn discover() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            DevError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::discover_from(&cwd)
    }

    /// Discover the project by walking upward from `start`.
    pub fn discover_from<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = start.as_ref();

        start
            .ancestors()
            .find(|dir| dir.join(PROJECT_MARKER).is_file())
            .map(|dir| Self::at(dir))
            .ok_or_else(|| {
                DevError::UserError(format!(
                    "not inside a CMake project: no {} found in {} or any parent directory",
                    PROJECT_MARKER,
                    start.display()
                ))
            })
    }

    /// Use `root` as the project root without any checks.
    pub fn at<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of a build directory name such as `build-asan`.
    pub fn build_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join(MODELS_DIR)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.root.join(RESULTS_DIR)
    }

    /// Get the path to the optional config file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Get the path to the pipeline run log.
    pub fn run_log(&self) -> PathBuf {
        self.results_dir().join("verification.ndjson")
    }

    pub fn web_dir(&self) -> PathBuf {
        self.root.join("web")
    }

    /// Output directory of generated API documentation.
    pub fn docs_output_dir(&self) -> PathBuf {
        self.web_dir().join("docs")
    }

    pub fn media_dir(&self) -> PathBuf {
        self.web_dir().join("media")
    }

    pub fn doxyfile(&self) -> PathBuf {
        self.root.join("Doxyfile")
    }

    pub fn doc_theme_dir(&self) -> PathBuf {
        self.root.join("doxytheme")
    }

    /// Project name, taken from the root directory's file name.
    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }
}

/// Read the project version declared in `CMakeLists.txt`.
///
/// Returns [`UNKNOWN_VERSION`] when the file is unreadable or declares no version.
pub fn project_version(layout: &ProjectLayout) -> String {
    let Ok(contents) = std::fs::read_to_string(layout.root.join(PROJECT_MARKER)) else {
        return UNKNOWN_VERSION.to_string();
    };

    PROJECT_VERSION_RE
        .as_ref()
        .and_then(|re| re.captures(&contents))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

/// Everything a command handler needs, passed explicitly.
pub struct DevContext<'a> {
    pub layout: ProjectLayout,
    pub platform: Platform,
    pub config: Config,
    pub runner: &'a dyn ProcessRunner,
}

impl<'a> DevContext<'a> {
    /// Build a context for the current platform.
    pub fn new(layout: ProjectLayout, config: Config, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            layout,
            platform: Platform::current(),
            config,
            runner,
        }
    }

    /// Override the target platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Base name of the project's executable.
    pub fn artifact_name(&self) -> String {
        self.config
            .artifact_name
            .clone()
            .unwrap_or_else(|| self.layout.project_name())
    }

    /// Recreate the orchestrator-managed output directories.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        for dir in [self.layout.models_dir(), self.layout.results_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                DevError::UserError(format!(
                    "failed to create directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, FakeRunner, create_test_project};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_project_root() {
        let temp_dir = create_test_project();
        let layout = ProjectLayout::discover_from(temp_dir.path()).unwrap();
        assert_eq!(layout.root, temp_dir.path());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp_dir = create_test_project();
        let nested = temp_dir.path().join("lib").join("src");
        std::fs::create_dir_all(&nested).unwrap();

        let layout = ProjectLayout::discover_from(&nested).unwrap();
        assert_eq!(layout.root, temp_dir.path());
    }

    #[test]
    #[serial]
    fn test_discover_uses_working_directory() {
        let temp_dir = create_test_project();
        let nested = temp_dir.path().join("cli");
        std::fs::create_dir_all(&nested).unwrap();
        let _guard = DirGuard::new(&nested);

        let layout = ProjectLayout::discover().unwrap();
        assert_eq!(
            layout.root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_outside_project_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = ProjectLayout::discover_from(temp_dir.path()).unwrap_err();
        assert!(matches!(err, DevError::UserError(_)));
        assert!(err.to_string().contains("CMakeLists.txt"));
    }

    #[test]
    fn test_well_known_paths() {
        let layout = ProjectLayout::at("/p");
        assert_eq!(layout.build_dir("build-asan"), PathBuf::from("/p/build-asan"));
        assert_eq!(layout.models_dir(), PathBuf::from("/p/models"));
        assert_eq!(layout.run_log(), PathBuf::from("/p/results/verification.ndjson"));
        assert_eq!(layout.docs_output_dir(), PathBuf::from("/p/web/docs"));
        assert_eq!(layout.config_file(), PathBuf::from("/p/devflow.yaml"));
        assert_eq!(layout.project_name(), "p");
    }

    #[test]
    fn test_project_version_parsed() {
        let temp_dir = create_test_project();
        let layout = ProjectLayout::at(temp_dir.path());
        assert_eq!(project_version(&layout), "1.2.3");
    }

    #[test]
    fn test_project_version_unknown() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(PROJECT_MARKER), "project(demo)\n").unwrap();
        let layout = ProjectLayout::at(temp_dir.path());
        assert_eq!(project_version(&layout), UNKNOWN_VERSION);

        let missing = ProjectLayout::at(temp_dir.path().join("nope"));
        assert_eq!(project_version(&missing), UNKNOWN_VERSION);
    }

    #[test]
    fn test_platform_conventions() {
        assert_eq!(Platform::Windows.executable_name("app"), "app.exe");
        assert_eq!(Platform::Unix.executable_name("app"), "app");
        assert!(Platform::Windows.organizes_by_configuration());
        assert!(!Platform::Unix.organizes_by_configuration());
    }

    #[test]
    fn test_artifact_name_defaults_to_directory() {
        let runner = FakeRunner::new();
        let ctx = DevContext::new(ProjectLayout::at("/work/shark"), Config::default(), &runner);
        assert_eq!(ctx.artifact_name(), "shark");

        let mut config = Config::default();
        config.artifact_name = Some("app".to_string());
        let ctx = DevContext::new(ProjectLayout::at("/work/shark"), config, &runner);
        assert_eq!(ctx.artifact_name(), "app");
    }

    #[test]
    fn test_ensure_output_dirs() {
        let temp_dir = create_test_project();
        let runner = FakeRunner::new();
        let ctx = DevContext::new(
            ProjectLayout::at(temp_dir.path()),
            Config::default(),
            &runner,
        );
        ctx.ensure_output_dirs().unwrap();
        assert!(temp_dir.path().join("models").is_dir());
        assert!(temp_dir.path().join("results").is_dir());
    }
}
