//! Scoped temporary configuration files.

use crate::error::{DevError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::warn;

/// A configuration file that exists only as long as this value.
///
/// The file is deleted when the guard is dropped (including during unwinding)
/// or explicitly through [`ScopedConfigFile::remove`].
#[derive(Debug)]
pub struct ScopedConfigFile {
    file: NamedTempFile,
}

impl ScopedConfigFile {
    /// Write `contents` to a fresh `devflow-*.conf` file in the system temp dir.
    pub fn create(contents: &str) -> Result<Self> {
        let mut file = Builder::new()
            .prefix("devflow-")
            .suffix(".conf")
            .tempfile()
            .map_err(|e| {
                DevError::UserError(format!("failed to create temporary config file: {}", e))
            })?;

        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| {
                DevError::UserError(format!(
                    "failed to write temporary config file '{}': {}",
                    file.path().display(),
                    e
                ))
            })?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting failure.
    pub fn remove(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close().map_err(|e| {
            DevError::UserError(format!(
                "failed to remove temporary config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Run `f` with the path of a temporary file holding `contents`.
///
/// The file is removed afterwards whether `f` succeeds, fails or panics.
pub fn with_scoped_config<T>(contents: &str, f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    let scoped = ScopedConfigFile::create(contents)?;
    let result = f(scoped.path());

    if let Err(e) = scoped.remove() {
        warn!(error = %e, "temporary config cleanup failed");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_holds_contents_while_alive() {
        let scoped = ScopedConfigFile::create("epochs = 5\n").unwrap();
        let name = scoped.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("devflow-"));
        assert!(name.ends_with(".conf"));
        assert_eq!(std::fs::read_to_string(scoped.path()).unwrap(), "epochs = 5\n");
    }

    #[test]
    fn test_removed_after_success() {
        let mut seen = PathBuf::new();
        let value = with_scoped_config("a = 1\n", |path| {
            seen = path.to_path_buf();
            assert!(path.exists());
            Ok(7)
        })
        .unwrap();
        assert_eq!(value, 7);
        assert!(!seen.exists());
    }

    #[test]
    fn test_removed_after_error() {
        let mut seen = PathBuf::new();
        let result: Result<()> = with_scoped_config("a = 1\n", |path| {
            seen = path.to_path_buf();
            Err(DevError::RunFailed {
                program: "app".to_string(),
                code: 3,
            })
        });
        assert!(matches!(result, Err(DevError::RunFailed { code: 3, .. })));
        assert!(!seen.exists());
    }

    #[test]
    fn test_removed_after_panic() {
        let seen = std::sync::Mutex::new(PathBuf::new());
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<()> = with_scoped_config("a = 1\n", |path| {
                *seen.lock().unwrap() = path.to_path_buf();
                panic!("process launcher blew up");
            });
        }));
        assert!(outcome.is_err());
        let path = seen.lock().unwrap().clone();
        assert!(!path.as_os_str().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let scoped = ScopedConfigFile::create("x").unwrap();
        let path = scoped.path().to_path_buf();
        drop(scoped);
        assert!(!path.exists());
    }
}
