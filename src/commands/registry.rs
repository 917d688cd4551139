//! The closed set of commands and the options each one owns.
//!
//! The registry is a static table consulted in a fixed order. Resolution
//! never depends on anything but the parsed [`Flags`].

use super::{analyze, build, clean, demo, docs, run, test};
use crate::cli::Flags;
use crate::context::DevContext;
use crate::error::Result;
use std::fmt;

/// Identifies a command in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Build,
    Test,
    Run,
    Demo,
    Clean,
    Docs,
    Analyze,
    Format,
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandId::Build => "build",
            CommandId::Test => "test",
            CommandId::Run => "run",
            CommandId::Demo => "demo",
            CommandId::Clean => "clean",
            CommandId::Docs => "docs",
            CommandId::Analyze => "analyze",
            CommandId::Format => "format",
        };
        f.write_str(name)
    }
}

/// Type of value an option carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Integer,
    String,
}

/// Handler signature shared by every command.
pub type Handler = fn(&DevContext<'_>, &Flags) -> Result<()>;

/// An option flag and how to tell whether the user set it.
pub struct OptionDescriptor {
    /// Long flag name as typed on the command line.
    pub name: &'static str,
    /// Additional spellings (short flags and aliases).
    pub extra_flags: &'static [&'static str],
    pub value_kind: ValueKind,
    /// Default rendered for help output.
    pub default: Option<&'static str>,
    pub is_set: fn(&Flags) -> bool,
}

impl fmt::Debug for OptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("name", &self.name)
            .field("value_kind", &self.value_kind)
            .finish()
    }
}

/// One command: its action flag, handler, and the options it owns.
pub struct CommandDescriptor {
    pub id: CommandId,
    /// Action flag that selects this command explicitly.
    pub flag: &'static str,
    pub group: &'static str,
    pub handler: Handler,
    pub options: &'static [OptionDescriptor],
    pub is_requested: fn(&Flags) -> bool,
}

impl CommandDescriptor {
    /// Whether any option owned by this command is set.
    pub fn has_option_set(&self, flags: &Flags) -> bool {
        self.options.iter().any(|opt| (opt.is_set)(flags))
    }

    /// Names of the owned options that are set.
    pub fn set_options(&self, flags: &Flags) -> Vec<&'static str> {
        self.options
            .iter()
            .filter(|opt| (opt.is_set)(flags))
            .map(|opt| opt.name)
            .collect()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("id", &self.id)
            .field("flag", &self.flag)
            .field("options", &self.options)
            .finish()
    }
}

const fn flag(
    name: &'static str,
    extra_flags: &'static [&'static str],
    is_set: fn(&Flags) -> bool,
) -> OptionDescriptor {
    OptionDescriptor {
        name,
        extra_flags,
        value_kind: ValueKind::Boolean,
        default: None,
        is_set,
    }
}

const BUILD_OPTIONS: &[OptionDescriptor] = &[
    flag("debug", &[], |f| f.debug),
    flag("verbose", &[], |f| f.verbose),
    OptionDescriptor {
        name: "jobs",
        extra_flags: &["-j"],
        value_kind: ValueKind::Integer,
        default: Some("0"),
        is_set: |f| f.jobs > 0,
    },
];

const TEST_OPTIONS: &[OptionDescriptor] = &[
    flag("unit", &[], |f| f.unit),
    flag("integration", &[], |f| f.integration),
    flag("e2e", &[], |f| f.e2e),
    OptionDescriptor {
        name: "filter",
        extra_flags: &[],
        value_kind: ValueKind::String,
        default: None,
        is_set: |f| f.filter.is_some(),
    },
    flag("run-with-address-sanitizer", &["run-asan"], |f| {
        f.run_with_address_sanitizer
    }),
    flag("run-with-ub-sanitizer", &["run-ubsan"], |f| {
        f.run_with_ub_sanitizer
    }),
    flag("coverage", &[], |f| f.coverage),
    flag("full-check", &[], |f| f.full_check),
];

const RUN_OPTIONS: &[OptionDescriptor] = &[OptionDescriptor {
    name: "config",
    extra_flags: &[],
    value_kind: ValueKind::String,
    default: None,
    is_set: |f| f.config.is_some(),
}];

const CLEAN_OPTIONS: &[OptionDescriptor] = &[
    flag("clean-all", &[], |f| f.clean_all),
    flag("clean-docs", &[], |f| f.clean_docs),
];

const DOCS_OPTIONS: &[OptionDescriptor] = &[flag("open-docs", &[], |f| f.open_docs)];

const FORMAT_OPTIONS: &[OptionDescriptor] = &[flag("dry-run", &[], |f| f.dry_run)];

/// Every command, in resolution order.
pub static REGISTRY: [CommandDescriptor; 8] = [
    CommandDescriptor {
        id: CommandId::Build,
        flag: "build",
        group: "Build options",
        handler: build::cmd_build,
        options: BUILD_OPTIONS,
        is_requested: |f| f.build,
    },
    CommandDescriptor {
        id: CommandId::Test,
        flag: "test",
        group: "Test options",
        handler: test::cmd_test,
        options: TEST_OPTIONS,
        is_requested: |f| f.test,
    },
    CommandDescriptor {
        id: CommandId::Run,
        flag: "run",
        group: "Run options",
        handler: run::cmd_run,
        options: RUN_OPTIONS,
        is_requested: |f| f.run,
    },
    CommandDescriptor {
        id: CommandId::Demo,
        flag: "demo",
        group: "Demo options",
        handler: demo::cmd_demo,
        options: &[],
        is_requested: |f| f.demo,
    },
    CommandDescriptor {
        id: CommandId::Clean,
        flag: "clean",
        group: "Clean options",
        handler: clean::cmd_clean,
        options: CLEAN_OPTIONS,
        is_requested: |f| f.clean,
    },
    CommandDescriptor {
        id: CommandId::Docs,
        flag: "generate-docs",
        group: "Documentation options",
        handler: docs::cmd_docs,
        options: DOCS_OPTIONS,
        is_requested: |f| f.generate_docs,
    },
    CommandDescriptor {
        id: CommandId::Analyze,
        flag: "analyze",
        group: "Analysis options",
        handler: analyze::cmd_analyze,
        options: &[],
        is_requested: |f| f.analyze,
    },
    CommandDescriptor {
        id: CommandId::Format,
        flag: "format",
        group: "Format options",
        handler: analyze::cmd_format,
        options: FORMAT_OPTIONS,
        is_requested: |f| f.format,
    },
];

