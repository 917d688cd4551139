//! Implementation of `devflow --generate-docs`.

use crate::cli::Flags;
use crate::context::DevContext;
use crate::docs::generate_docs;
use crate::error::Result;

pub fn cmd_docs(ctx: &DevContext<'_>, flags: &Flags) -> Result<()> {
    generate_docs(ctx, flags.open_docs).map(|_| ())
}
