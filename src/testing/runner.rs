//! Test harness invocation.

use crate::build::BuildVariant;
use crate::context::{DevContext, Platform};
use crate::error::{DevError, Result};
use crate::process::{
    Invocation, OUTPUT_TAIL_MAX_CHARS, OUTPUT_TAIL_MAX_LINES, ProcessStatus, require_tool,
    truncate_output,
};
use std::fmt;
use std::path::Path;
use tracing::info;

pub const TEST_HARNESS_HINT: &str = "ctest ships with CMake; install CMake and make sure it is on PATH.";

/// Category label attached to registered tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestLabel {
    Unit,
    Integration,
    EndToEnd,
}

impl TestLabel {
    pub const ALL: [TestLabel; 3] = [TestLabel::Unit, TestLabel::Integration, TestLabel::EndToEnd];

    /// Label string as registered with the harness.
    pub fn as_str(self) -> &'static str {
        match self {
            TestLabel::Unit => "Unit",
            TestLabel::Integration => "Integration",
            TestLabel::EndToEnd => "E2E",
        }
    }
}

impl fmt::Display for TestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tests to run: an ordered label set plus an optional name pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSelection {
    labels: Vec<TestLabel>,
    filter: Option<String>,
}

/// Every label, no filter.
impl Default for TestSelection {
    fn default() -> Self {
        Self::new([], None)
    }
}

impl TestSelection {
    /// An empty label set selects every label.
    pub fn new(labels: impl IntoIterator<Item = TestLabel>, filter: Option<String>) -> Self {
        let mut labels: Vec<TestLabel> = labels.into_iter().collect();
        labels.sort();
        labels.dedup();
        if labels.is_empty() {
            labels = TestLabel::ALL.to_vec();
        }

        let filter = filter.filter(|f| !f.trim().is_empty());
        Self { labels, filter }
    }

    pub fn labels(&self) -> &[TestLabel] {
        &self.labels
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Label disjunction understood by the harness, e.g. `Unit|E2E`.
    pub fn label_expression(&self) -> String {
        self.labels
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// The harness invocation for `variant`.
pub fn harness_invocation(
    ctx: &DevContext<'_>,
    variant: &BuildVariant,
    selection: &TestSelection,
    verbose: bool,
) -> Invocation {
    let mut inv = Invocation::new(&ctx.config.tools.test_harness)
        .arg("--test-dir")
        .path_arg(variant.build_dir())
        .arg("-L")
        .arg(selection.label_expression())
        .current_dir(&ctx.layout.root);

    if let Some(filter) = selection.filter() {
        inv = inv.arg("-R").arg(filter);
    }
    if ctx.platform == Platform::Windows {
        inv = inv.arg("-C").arg(variant.build_type().as_str());
    }
    if verbose {
        inv = inv.arg("--verbose");
    } else {
        inv = inv.captured();
    }
    inv
}

/// Run the harness once and return its status unchanged.
///
/// Verbose runs stream the harness output; otherwise output is captured and
/// only the summary (or the tail of a failing run) is printed.
pub fn run_test_harness(
    ctx: &DevContext<'_>,
    variant: &BuildVariant,
    selection: &TestSelection,
    verbose: bool,
) -> Result<ProcessStatus> {
    require_tool(ctx.runner, &ctx.config.tools.test_harness, TEST_HARNESS_HINT)?;

    info!(
        variant = %variant.id(),
        labels = %selection.label_expression(),
        filter = selection.filter().unwrap_or(""),
        "running tests"
    );
    println!(
        "Running {} tests ({} build)...",
        selection
            .labels()
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        variant.id()
    );

    let status = ctx
        .runner
        .run(&harness_invocation(ctx, variant, selection, verbose))?;

    if !verbose {
        print_harness_summary(&status, variant.build_dir());
    }
    Ok(status)
}

/// Run the harness and treat a non-zero status as [`DevError::TestFailure`].
pub fn run_tests(
    ctx: &DevContext<'_>,
    variant: &BuildVariant,
    selection: &TestSelection,
    verbose: bool,
) -> Result<()> {
    let status = run_test_harness(ctx, variant, selection, verbose)?;
    if status.success() {
        println!("\nAll {} tests passed!", variant.id());
        Ok(())
    } else {
        println!("\nSome {} tests failed!", variant.id());
        Err(DevError::TestFailure {
            code: status.exit_code(),
        })
    }
}

fn print_harness_summary(status: &ProcessStatus, build_dir: &Path) {
    let output = status.combined_output();
    if status.success() {
        for line in output
            .lines()
            .filter(|l| l.contains("tests passed") || l.contains("Total Test time"))
        {
            println!("{}", line.trim());
        }
        return;
    }

    let tail = truncate_output(&output, OUTPUT_TAIL_MAX_LINES, OUTPUT_TAIL_MAX_CHARS);
    if !tail.is_empty() {
        println!("{}", tail);
    }
    println!(
        "Full log: {}",
        build_dir.join("Testing").join("Temporary").join("LastTest.log").display()
    );
}
