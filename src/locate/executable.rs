//! Platform-aware lookup of a previously built artifact.

use crate::context::Platform;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration subdirectories probed (in order) by multi-config generators.
pub const CONFIGURATION_SUBDIRS: [&str; 4] = ["Debug", "Release", "RelWithDebInfo", "MinSizeRel"];

/// Flat output directory used by single-config generators.
pub const FLAT_OUTPUT_SUBDIR: &str = "bin";

/// A built artifact that existed on disk when it was located.
///
/// Not cached: callers locate again after every build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    path: PathBuf,
}

impl ResolvedExecutable {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Candidate locations for `name`, in probe order.
pub fn candidate_paths(build_dir: &Path, platform: Platform, name: &str) -> Vec<PathBuf> {
    let file_name = platform.executable_name(name);
    let mut candidates = Vec::new();

    if platform.organizes_by_configuration() {
        candidates.extend(
            CONFIGURATION_SUBDIRS
                .iter()
                .map(|config| build_dir.join(config).join(&file_name)),
        );
    }
    candidates.push(build_dir.join(FLAT_OUTPUT_SUBDIR).join(&file_name));

    candidates
}

/// Locate the built artifact `name` under `build_dir`.
///
/// Returns `None` without probing when `build_dir` does not exist. Absence is
/// not an error; callers decide whether to build.
pub fn locate_executable(
    build_dir: &Path,
    platform: Platform,
    name: &str,
) -> Option<ResolvedExecutable> {
    if !build_dir.is_dir() {
        debug!(build_dir = %build_dir.display(), "build directory missing; not built");
        return None;
    }

    candidate_paths(build_dir, platform, name)
        .into_iter()
        .find(|candidate| candidate.is_file())
        .map(|path| ResolvedExecutable { path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_missing_build_dir_is_absent() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        assert!(locate_executable(&build, Platform::Unix, "app").is_none());
        assert!(locate_executable(&build, Platform::Windows, "app").is_none());
    }

    #[test]
    fn test_unix_probes_flat_directory_only() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        touch(&build.join("Debug").join("app"));

        assert!(locate_executable(&build, Platform::Unix, "app").is_none());

        touch(&build.join("bin").join("app"));
        let found = locate_executable(&build, Platform::Unix, "app").unwrap();
        assert_eq!(found.path(), build.join("bin").join("app"));
    }

    #[test]
    fn test_windows_probe_order() {
        let build = PathBuf::from("/p/build");
        let candidates = candidate_paths(&build, Platform::Windows, "app");
        assert_eq!(
            candidates,
            vec![
                build.join("Debug").join("app.exe"),
                build.join("Release").join("app.exe"),
                build.join("RelWithDebInfo").join("app.exe"),
                build.join("MinSizeRel").join("app.exe"),
                build.join("bin").join("app.exe"),
            ]
        );
    }

    #[test]
    fn test_windows_prefers_configuration_subdirectory() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        touch(&build.join("Release").join("app.exe"));
        touch(&build.join("bin").join("app.exe"));

        let found = locate_executable(&build, Platform::Windows, "app").unwrap();
        assert_eq!(found.path(), build.join("Release").join("app.exe"));
    }

    #[test]
    fn test_directory_with_artifact_name_is_not_a_match() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        std::fs::create_dir_all(build.join("bin").join("app")).unwrap();
        assert!(locate_executable(&build, Platform::Unix, "app").is_none());
    }
}
