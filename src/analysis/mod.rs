//! Static analysis and formatting of the driven project's sources.

mod format;
mod static_analysis;

#[cfg(test)]
mod tests;

pub use format::format_sources;
pub use static_analysis::{AnalysisPolicy, run_static_analysis};
