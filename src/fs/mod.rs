//! Filesystem helpers for devflow.
//!
//! - [`scoped`]: temporary configuration files removed on every exit path
//! - [`sources`]: discovery of C/C++ sources under the project tree

pub mod scoped;
pub mod sources;

pub use scoped::{ScopedConfigFile, with_scoped_config};
pub use sources::{collect_sources, existing_dirs};
