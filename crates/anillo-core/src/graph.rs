//! The patch graph: an append-only node registry plus connection set.
//!
//! [`PatchGraph`] is write-once, read-at-emission. Node ids equal insertion
//! order; `connect` refuses to reference an id that has not been allocated
//! yet, which turns the creation-order/wiring-order coupling into a checked
//! invariant instead of an unstated convention.

use crate::connection::Connection;
use crate::node::{Node, NodeId, NodeKind};
use crate::param::ParamValue;

/// Errors from graph mutation.
///
/// Both variants signal a construction defect, not a user error: every id
/// the builder wires comes from its own `add_node` calls, and every
/// parameter list it assembles matches its kind's shape. They surface
/// loudly rather than being tolerated.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A connection referenced an id that has not been allocated yet.
    #[error("connection references node id {id}, but only {count} nodes exist")]
    InvalidReference {
        /// The out-of-range id.
        id: u32,
        /// Number of nodes allocated at the time of the append.
        count: u32,
    },
    /// A parameter list did not match the node kind's shape.
    #[error("invalid parameters for {kind:?} node: {reason}")]
    ParamShape {
        /// Kind whose shape was violated.
        kind: NodeKind,
        /// What was wrong with the list.
        reason: String,
    },
}

/// Append-only patch graph: ordered nodes and ordered connections.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PatchGraph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl PatchGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its id (the insertion index).
    ///
    /// Allocation is monotonic and ids are never reused. Fails only when
    /// `params` does not match the kind's shape.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        x: i32,
        y: i32,
        params: Vec<ParamValue>,
    ) -> Result<NodeId, GraphError> {
        kind.check_params(&params)
            .map_err(|reason| GraphError::ParamShape { kind, reason })?;
        let id = NodeId(self.nodes.len() as u32);
        tracing::debug!("graph_add: {kind:?} node {id} at ({x}, {y})");
        self.nodes.push(Node {
            id,
            kind,
            x,
            y,
            params,
        });
        Ok(id)
    }

    /// Appends a connection from `source`'s `outlet` to `dest`'s `inlet`.
    ///
    /// Both ids must already be allocated; referencing a future id fails
    /// with [`GraphError::InvalidReference`].
    pub fn connect(
        &mut self,
        source: NodeId,
        outlet: u32,
        dest: NodeId,
        inlet: u32,
    ) -> Result<(), GraphError> {
        let count = self.nodes.len() as u32;
        for id in [source, dest] {
            if id.0 >= count {
                return Err(GraphError::InvalidReference { id: id.0, count });
            }
        }
        tracing::debug!("graph_connect: {source}:{outlet} -> {dest}:{inlet}");
        self.connections.push(Connection {
            source,
            outlet,
            dest,
            inlet,
        });
        Ok(())
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Nodes of one kind, in creation order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Connections arriving at `dest`, in creation order.
    pub fn connections_to(&self, dest: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.dest == dest)
    }

    /// Connections leaving `source`, in creation order.
    pub fn connections_from(&self, source: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.source == source)
    }
}
