//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{DevError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DevError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if the file exists, otherwise return defaults.
    ///
    /// A present but invalid file is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DevError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DevError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - every tool name is non-empty, and at least one analyzer is listed
    /// - `source_globs` is non-empty and every entry compiles
    /// - every demo step command splits into at least one word
    pub fn validate(&self) -> Result<()> {
        let tools = &self.tools;
        let named = [
            ("tools.build", &tools.build),
            ("tools.test_harness", &tools.test_harness),
            ("tools.fast_backend", &tools.fast_backend),
            ("tools.coverage_collector", &tools.coverage_collector),
            ("tools.coverage_renderer", &tools.coverage_renderer),
            ("tools.doc_generator", &tools.doc_generator),
            ("tools.formatter", &tools.formatter),
        ];
        for (field, value) in named {
            if value.trim().is_empty() {
                return Err(DevError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    field
                )));
            }
        }

        if tools.analyzers.iter().all(|a| a.trim().is_empty()) {
            return Err(DevError::UserError(
                "config validation failed: tools.analyzers must list at least one program"
                    .to_string(),
            ));
        }

        if self.source_globs.is_empty() {
            return Err(DevError::UserError(
                "config validation failed: source_globs must not be empty".to_string(),
            ));
        }
        self.source_globset()?;

        for step in &self.demo_steps {
            let words = shell_words::split(&step.command).map_err(|e| {
                DevError::UserError(format!(
                    "config validation failed: demo step '{}' has an unparsable command: {}\n\
                     Fix: check for unmatched quotes or invalid escape sequences.",
                    step.title, e
                ))
            })?;
            if words.is_empty() {
                return Err(DevError::UserError(format!(
                    "config validation failed: demo step '{}' has an empty command",
                    step.title
                )));
            }
        }

        Ok(())
    }

    /// Compile `source_globs` into a matcher.
    pub fn source_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in &self.source_globs {
            let normalized = pattern.trim().replace('\\', "/");
            if normalized.is_empty() {
                continue;
            }
            let glob = Glob::new(&normalized).map_err(|e| {
                DevError::UserError(format!(
                    "config validation failed: invalid source glob '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| DevError::UserError(format!("failed to build source globs: {}", e)))
    }
}
