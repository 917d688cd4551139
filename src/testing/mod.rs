//! Test execution against built variants.
//!
//! [`run_tests`] is the strict entry point used by a plain test run: a
//! failing harness is an error. [`run_coverage`] drives the same harness but
//! tolerates failures so a report is always produced.

mod coverage;
mod runner;


pub use coverage::run_coverage;
pub use runner::{TestLabel, TestSelection, run_tests};
