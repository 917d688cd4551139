//! CLI argument parsing for devflow.
//!
//! Uses clap derive macros for declarative argument definitions. Actions
//! are flags rather than subcommands: the parsed [`Flags`] value is handed to
//! the command registry, which picks exactly one handler.

use clap::Parser;

/// devflow: build, test and verify a CMake project.
///
/// Pick one action (`--build`, `--test`, `--run`, ...). Options belonging to
/// an action imply it when the action flag is omitted, as long as all the
/// options given belong to the same action.
#[derive(Parser, Debug)]
#[command(name = "devflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub flags: Flags,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// The complete parsed flag set.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    // =========================================================================
    // Actions
    // =========================================================================
    /// Configure and compile the project
    #[arg(long, help_heading = "Actions")]
    pub build: bool,

    /// Run the project's tests
    #[arg(long, help_heading = "Actions")]
    pub test: bool,

    /// Run the built executable (build it first if needed)
    #[arg(long, help_heading = "Actions")]
    pub run: bool,

    /// Clean, build and run a scripted demonstration
    #[arg(long, help_heading = "Actions")]
    pub demo: bool,

    /// Remove build directories
    #[arg(long, help_heading = "Actions")]
    pub clean: bool,

    /// Generate API documentation
    #[arg(long = "generate-docs", alias = "docs", help_heading = "Actions")]
    pub generate_docs: bool,

    /// Run static analysis
    #[arg(long, help_heading = "Actions")]
    pub analyze: bool,

    /// Format sources with clang-format
    #[arg(long, help_heading = "Actions")]
    pub format: bool,

    // =========================================================================
    // Build options
    // =========================================================================
    /// Build in Debug mode
    #[arg(long, help_heading = "Build options")]
    pub debug: bool,

    /// Verbose tool output (and debug-level logging)
    #[arg(long, help_heading = "Build options")]
    pub verbose: bool,

    /// Parallel compile jobs (0 = build tool default)
    #[arg(long, short = 'j', default_value_t = 0, help_heading = "Build options")]
    pub jobs: u32,

    // =========================================================================
    // Test options
    // =========================================================================
    /// Run unit tests
    #[arg(long, help_heading = "Test options")]
    pub unit: bool,

    /// Run integration tests
    #[arg(long, help_heading = "Test options")]
    pub integration: bool,

    /// Run end-to-end tests
    #[arg(long, help_heading = "Test options")]
    pub e2e: bool,

    /// Only run tests whose name matches this pattern
    #[arg(long, value_name = "PATTERN", help_heading = "Test options")]
    pub filter: Option<String>,

    /// Build and test with Address Sanitizer
    #[arg(long, alias = "run-asan", help_heading = "Test options")]
    pub run_with_address_sanitizer: bool,

    /// Build and test with Undefined Behavior Sanitizer
    #[arg(long, alias = "run-ubsan", help_heading = "Test options")]
    pub run_with_ub_sanitizer: bool,

    /// Measure test coverage and render an HTML report
    #[arg(long, help_heading = "Test options")]
    pub coverage: bool,

    /// Run every verification stage, stopping at the first failure
    #[arg(long, help_heading = "Test options")]
    pub full_check: bool,

    // =========================================================================
    // Run options
    // =========================================================================
    /// Configuration name (default, fast, accurate, production) or file path
    #[arg(long, value_name = "NAME|PATH", help_heading = "Run options")]
    pub config: Option<String>,

    // =========================================================================
    // Clean options
    // =========================================================================
    /// Also remove models/ and results/
    #[arg(long, help_heading = "Clean options")]
    pub clean_all: bool,

    /// Also remove generated documentation
    #[arg(long, help_heading = "Clean options")]
    pub clean_docs: bool,

    // =========================================================================
    // Documentation options
    // =========================================================================
    /// Open the generated documentation in a browser
    #[arg(long, help_heading = "Documentation options")]
    pub open_docs: bool,

    // =========================================================================
    // Format options
    // =========================================================================
    /// Report files that would be reformatted without changing them
    #[arg(long, help_heading = "Format options")]
    pub dry_run: bool,

    /// Arguments passed to the executable by --run
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Flags {
        let argv = std::iter::once("devflow").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().flags
    }

    #[test]
    fn test_no_arguments_is_default() {
        assert_eq!(parse(&[]), Flags::default());
    }

    #[test]
    fn test_build_options() {
        let flags = parse(&["--build", "--debug", "-j", "8", "--verbose"]);
        assert!(flags.build && flags.debug && flags.verbose);
        assert_eq!(flags.jobs, 8);
    }

    #[test]
    fn test_long_option_names() {
        let flags = parse(&[
            "--run-with-address-sanitizer",
            "--run-with-ub-sanitizer",
            "--full-check",
            "--generate-docs",
            "--open-docs",
            "--clean-all",
            "--clean-docs",
            "--dry-run",
        ]);
        assert!(flags.run_with_address_sanitizer);
        assert!(flags.run_with_ub_sanitizer);
        assert!(flags.full_check);
        assert!(flags.generate_docs);
        assert!(flags.open_docs);
        assert!(flags.clean_all && flags.clean_docs && flags.dry_run);
    }

    #[test]
    fn test_short_aliases() {
        let flags = parse(&["--run-asan", "--docs"]);
        assert!(flags.run_with_address_sanitizer);
        assert!(flags.generate_docs);
    }

    #[test]
    fn test_passthrough_arguments() {
        let flags = parse(&["--run", "--config", "fast", "--", "analyze", "--file", "x.txt"]);
        assert!(flags.run);
        assert_eq!(flags.config.as_deref(), Some("fast"));
        assert_eq!(flags.args, vec!["analyze", "--file", "x.txt"]);

        let flags = parse(&["--run", "version"]);
        assert_eq!(flags.args, vec!["version"]);
    }

    #[test]
    fn test_filter_value() {
        let flags = parse(&["--test", "--unit", "--filter", "Tokenizer*"]);
        assert!(flags.test && flags.unit);
        assert_eq!(flags.filter.as_deref(), Some("Tokenizer*"));
    }
}
