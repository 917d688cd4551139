//! Build-system generator selection.

use crate::context::{DevContext, Platform};
use crate::process::Invocation;
use tracing::debug;

/// Location of the Visual Studio installation locator.
pub const VSWHERE_PATH: &str =
    r"C:\Program Files (x86)\Microsoft Visual Studio\Installer\vswhere.exe";

/// Generator used when the installed Visual Studio version is unknown.
pub const NEWEST_VISUAL_STUDIO: &str = "Visual Studio 17 2022";

pub const NINJA_GENERATOR: &str = "Ninja";
pub const MAKEFILE_GENERATOR: &str = "Unix Makefiles";

/// Map an installation version such as `16.11.34601.136` to a generator.
pub fn generator_for_version(version: &str) -> &'static str {
    match version.trim().split('.').next() {
        Some("17") => "Visual Studio 17 2022",
        Some("16") => "Visual Studio 16 2019",
        _ => NEWEST_VISUAL_STUDIO,
    }
}

/// Pick the generator for the configure step.
///
/// On Windows the installed Visual Studio is probed; any probe failure falls
/// back to the newest known version. Elsewhere the fast backend is preferred
/// when it is installed.
pub fn select_generator(ctx: &DevContext<'_>) -> String {
    match ctx.platform {
        Platform::Windows => {
            let probe = Invocation::new(VSWHERE_PATH)
                .args(["-latest", "-property", "installationVersion"])
                .captured();
            match ctx.runner.run(&probe) {
                Ok(status) if status.success() => {
                    generator_for_version(&status.stdout).to_string()
                }
                Ok(status) => {
                    debug!(code = status.exit_code(), "vswhere probe failed");
                    NEWEST_VISUAL_STUDIO.to_string()
                }
                Err(e) => {
                    debug!(error = %e, "vswhere unavailable");
                    NEWEST_VISUAL_STUDIO.to_string()
                }
            }
        }
        Platform::Unix => {
            if ctx.runner.find_tool(&ctx.config.tools.fast_backend).is_some() {
                NINJA_GENERATOR.to_string()
            } else {
                MAKEFILE_GENERATOR.to_string()
            }
        }
    }
}
