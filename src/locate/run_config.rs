//! Resolution of `--config` references to configuration files.

use crate::config::Config;
use crate::context::ProjectLayout;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Translate a short name or literal path into an existing configuration file.
///
/// Short names come from `config.named_configs` and live under
/// `config.configs_dir`. Anything else is a literal path; relative literal
/// paths are taken relative to the project root. A reference that does not
/// resolve to an existing file is logged and yields `None` so the caller
/// proceeds without an override.
pub fn resolve_run_config(layout: &ProjectLayout, config: &Config, name: &str) -> Option<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let path = match config.named_configs.get(name) {
        Some(file) => layout.root.join(&config.configs_dir).join(file),
        None => {
            let literal = Path::new(name);
            if literal.is_absolute() {
                literal.to_path_buf()
            } else {
                layout.root.join(literal)
            }
        }
    };

    if path.is_file() {
        Some(path)
    } else {
        warn!(
            config = %name,
            path = %path.display(),
            "configuration file not found; running without a configuration override"
        );
        None
    }
}
