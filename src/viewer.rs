//! Opening generated reports in the desktop viewer.

use crate::context::{DevContext, Platform};
use crate::process::Invocation;
use std::path::Path;
use tracing::warn;

/// The platform opener command for `target`.
pub fn viewer_invocation(platform: Platform, target: &Path) -> Invocation {
    match platform {
        Platform::Windows => Invocation::new("cmd")
            .args(["/c", "start", ""])
            .path_arg(target),
        Platform::Unix if cfg!(target_os = "macos") => Invocation::new("open").path_arg(target),
        Platform::Unix => Invocation::new("xdg-open").path_arg(target),
    }
    .captured()
}

/// Try to open `target` in a viewer. Never fails; returns whether it worked.
pub fn open_in_viewer(ctx: &DevContext<'_>, target: &Path) -> bool {
    if !target.exists() {
        warn!(path = %target.display(), "nothing to open");
        return false;
    }

    match ctx.runner.run(&viewer_invocation(ctx.platform, target)) {
        Ok(status) if status.success() => {
            println!("Opened {}", target.display());
            true
        }
        Ok(status) => {
            warn!(
                path = %target.display(),
                code = status.exit_code(),
                "could not open viewer"
            );
            false
        }
        Err(e) => {
            warn!(path = %target.display(), error = %e, "could not open viewer");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeRunner, create_test_project, test_context};

    #[test]
    fn test_windows_uses_start() {
        let inv = viewer_invocation(Platform::Windows, Path::new("C:/r/index.html"));
        assert_eq!(inv.program, "cmd");
        assert_eq!(inv.args, vec!["/c", "start", "", "C:/r/index.html"]);
    }

    #[test]
    fn test_open_existing_file() {
        let temp = create_test_project();
        let report = temp.path().join("index.html");
        std::fs::write(&report, "<html></html>").unwrap();

        let runner = FakeRunner::new();
        let ctx = test_context(temp.path(), &runner);
        assert!(open_in_viewer(&ctx, &report));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_failures_are_not_fatal() {
        let temp = create_test_project();
        let report = temp.path().join("index.html");
        std::fs::write(&report, "<html></html>").unwrap();

        let runner = FakeRunner::new().fail_when(|_| true, 4);
        let ctx = test_context(temp.path(), &runner);
        assert!(!open_in_viewer(&ctx, &report));

        let runner = FakeRunner::new()
            .without_tool("xdg-open")
            .without_tool("open");
        let ctx = test_context(temp.path(), &runner);
        assert!(!open_in_viewer(&ctx, &report));
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let temp = create_test_project();
        let runner = FakeRunner::new();
        let ctx = test_context(temp.path(), &runner);
        assert!(!open_in_viewer(&ctx, &temp.path().join("missing.html")));
        assert!(runner.calls().is_empty());
    }
}
