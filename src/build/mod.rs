//! Build orchestration for the driven project.
//!
//! A [`BuildVariant`] names an isolated build tree (plain, sanitizer or
//! coverage instrumented); [`build_variant`] configures and compiles it
//! through the external build tool.

mod generator;
mod orchestrator;
mod variant;


pub use orchestrator::{BUILD_TOOL_HINT, BuildOptions, build_variant};
pub use variant::{BuildVariant, VariantId};
