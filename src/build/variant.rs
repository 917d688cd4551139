//! Build variants: one isolated build tree per instrumentation setting.

use crate::config::Config;
use crate::context::ProjectLayout;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Identity of a build variant. Each id owns a distinct build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantId {
    Standard,
    AddressSanitizer,
    UndefinedBehaviorSanitizer,
    Coverage,
}

impl VariantId {
    pub const ALL: [VariantId; 4] = [
        VariantId::Standard,
        VariantId::AddressSanitizer,
        VariantId::UndefinedBehaviorSanitizer,
        VariantId::Coverage,
    ];

    /// Build directory name relative to the project root.
    pub fn dir_name(self) -> &'static str {
        match self {
            VariantId::Standard => "build",
            VariantId::AddressSanitizer => "build-asan",
            VariantId::UndefinedBehaviorSanitizer => "build-ubsan",
            VariantId::Coverage => "build-coverage",
        }
    }

    /// Short human label used in progress output and errors.
    pub fn label(self) -> &'static str {
        match self {
            VariantId::Standard => "standard",
            VariantId::AddressSanitizer => "Address Sanitizer",
            VariantId::UndefinedBehaviorSanitizer => "Undefined Behavior Sanitizer",
            VariantId::Coverage => "coverage",
        }
    }

    pub fn is_instrumented(self) -> bool {
        !matches!(self, VariantId::Standard)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described build tree.
///
/// Constructed only through [`BuildVariant::for_id`], so the directory is
/// always the one owned by `id` and two different variants never share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariant {
    id: VariantId,
    build_dir: PathBuf,
    build_type: BuildType,
    extra_defines: BTreeMap<String, String>,
}

impl BuildVariant {
    /// Describe the variant `id` for this project.
    ///
    /// `debug` selects the build type of the standard variant; instrumented
    /// variants are always Debug builds.
    pub fn for_id(layout: &ProjectLayout, config: &Config, id: VariantId, debug: bool) -> Self {
        let build_type = if debug || id.is_instrumented() {
            BuildType::Debug
        } else {
            BuildType::Release
        };

        let mut extra_defines = BTreeMap::new();
        let define = match id {
            VariantId::Standard => None,
            VariantId::AddressSanitizer => Some(&config.sanitizers.address),
            VariantId::UndefinedBehaviorSanitizer => Some(&config.sanitizers.undefined_behavior),
            VariantId::Coverage => Some(&config.sanitizers.coverage),
        };
        if let Some(name) = define {
            extra_defines.insert(name.clone(), "ON".to_string());
        }

        Self {
            id,
            build_dir: layout.build_dir(id.dir_name()),
            build_type,
            extra_defines,
        }
    }

    pub fn id(&self) -> VariantId {
        self.id
    }

    pub fn build_dir(&self) -> &std::path::Path {
        &self.build_dir
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    /// `-D` arguments for the extra defines, in key order.
    pub fn define_args(&self) -> Vec<String> {
        self.extra_defines
            .iter()
            .map(|(k, v)| format!("-D{}={}", k, v))
            .collect()
    }
}
