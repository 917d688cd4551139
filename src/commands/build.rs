//! Implementation of `devflow --build`.

use super::{build_options, standard_variant};
use crate::build::build_variant;
use crate::cli::Flags;
use crate::context::DevContext;
use crate::error::Result;

/// Configure and compile the standard variant (Release unless `--debug`).
pub fn cmd_build(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    let variant = standard_variant(ctx, flags);
    build_variant(ctx, &variant, build_options(flags))
}
