//! Lookup of build artifacts and run configurations.

mod executable;
mod run_config;

pub use executable::{ResolvedExecutable, locate_executable};
pub use run_config::resolve_run_config;
