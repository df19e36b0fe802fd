//! Anillo Patch - text emission and parsing for sequencer graphs.
//!
//! The emitter renders a [`PatchGraph`](anillo_core::PatchGraph) to the
//! host's patch text: node lines in creation order, then connection lines
//! in creation order, framed by a fixed header and trailer. The parser is
//! the strict inverse; `parse(render(g)) == g` for every graph the builder
//! can produce, which is what the `inspect` workflow and the round-trip
//! tests rely on.

mod emit;
mod error;
mod parse;

pub use emit::{PATCH_HEADER, PATCH_TRAILER, render, write_patch};
pub use error::PatchError;
pub use parse::{parse, read_patch};
