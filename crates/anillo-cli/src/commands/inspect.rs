//! Patch inspection command: re-parse an emitted patch and report it.

use std::path::PathBuf;

use anillo_core::NodeKind;
use anillo_patch::read_patch;
use clap::Args;

#[derive(Args)]
pub struct InspectArgs {
    /// Patch file to inspect
    #[arg(value_name = "PATCH")]
    patch: PathBuf,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let graph = read_patch(&args.patch)?;

    println!("{}", args.patch.display());
    println!(
        "  {} nodes, {} connections",
        graph.node_count(),
        graph.connection_count()
    );
    for kind in NodeKind::ALL {
        let count = graph.nodes_of_kind(kind).count();
        if count > 0 {
            println!("  {:>4} {}", count, kind.wire_name());
        }
    }
    Ok(())
}
