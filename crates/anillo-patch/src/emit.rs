//! Patch text rendering.
//!
//! The emitter is a pure, stateless formatter over the graph's two ordered
//! sequences: one line per node (`<kind> <x> <y> <params…>`), then one line
//! per connection (`<src> <outlet> <dst> <inlet>`), framed by a fixed
//! canvas header and a fixed trailing coords line. Creation order is
//! emission order, which is what lets connection lines reference nodes by
//! bare index.

use std::path::Path;

use anillo_core::PatchGraph;

use crate::error::PatchError;

/// First line of every patch: the host canvas declaration.
pub const PATCH_HEADER: &str = "canvas 20 20 900 900 10";

/// Fixed trailing metadata line: the graph-on-parent display region.
pub const PATCH_TRAILER: &str = "coords 0 -1 1 1 400 400 1";

/// Renders `graph` to patch text.
pub fn render(graph: &PatchGraph) -> String {
    let mut out = String::new();
    out.push_str(PATCH_HEADER);
    out.push('\n');
    for node in graph.nodes() {
        out.push_str(&format!("{} {} {}", node.kind.wire_name(), node.x, node.y));
        for param in &node.params {
            out.push_str(&format!(" {param}"));
        }
        out.push('\n');
    }
    for c in graph.connections() {
        out.push_str(&format!(
            "{} {} {} {}\n",
            c.source.index(),
            c.outlet,
            c.dest.index(),
            c.inlet
        ));
    }
    out.push_str(PATCH_TRAILER);
    out.push('\n');
    out
}

/// Renders `graph` and writes it to `path`.
///
/// I/O failures surface unmodified; construction is cheap and idempotent,
/// so the caller can simply rerun. Nothing is written on a render of an
/// inconsistent graph because inconsistent graphs cannot be constructed.
pub fn write_patch(path: &Path, graph: &PatchGraph) -> Result<(), PatchError> {
    let text = render(graph);
    tracing::debug!(
        nodes = graph.node_count(),
        connections = graph.connection_count(),
        path = %path.display(),
        "writing patch"
    );
    std::fs::write(path, text).map_err(|source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    })
}
