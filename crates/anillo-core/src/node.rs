//! Node types for the patch graph.
//!
//! Each node has a [`NodeId`] equal to its insertion index, a [`NodeKind`]
//! naming its role in the control surface, an integer canvas position, and
//! a typed parameter list validated against the kind's shape at creation.

use crate::param::ParamValue;

/// Unique identifier for a node in a patch graph.
///
/// Node IDs are assigned sequentially at insertion and never reused; they
/// are what connection records reference, so they stay stable for the life
/// of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Wraps a raw index. The graph validates references on use, so a
    /// forged id cannot corrupt a graph — `connect` rejects it.
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// The role of a node in the generated control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// External input port (step index, or bulk state messages).
    Inlet,
    /// The single external output port.
    Outlet,
    /// Routes an integer index to exactly one of its N outlets.
    Selector,
    /// Conditionally forwards its data inlet (0) while its control
    /// inlet (1) is open.
    Gate,
    /// Emits a bare trigger pulse (rotation triggers).
    PulseSource,
    /// One interactive per-step control on the ring.
    StepWidget,
    /// Latches the last value that passed through it.
    StateCapture,
    /// Assembles a trigger tag plus N slot values into one aggregate.
    Packer,
    /// Disassembles an aggregate back into per-slot outputs.
    Unpacker,
    /// Symbolic message plumbing: per-step sends and the bulk-state
    /// scatter stage.
    RoutingHelper,
}

impl NodeKind {
    /// All kinds, in a fixed order (used for per-kind reporting).
    pub const ALL: [NodeKind; 10] = [
        NodeKind::Inlet,
        NodeKind::Outlet,
        NodeKind::Selector,
        NodeKind::Gate,
        NodeKind::PulseSource,
        NodeKind::StepWidget,
        NodeKind::StateCapture,
        NodeKind::Packer,
        NodeKind::Unpacker,
        NodeKind::RoutingHelper,
    ];

    /// The token that names this kind in the patch text.
    pub fn wire_name(self) -> &'static str {
        match self {
            NodeKind::Inlet => "inlet",
            NodeKind::Outlet => "outlet",
            NodeKind::Selector => "select",
            NodeKind::Gate => "spigot",
            NodeKind::PulseSource => "bng",
            NodeKind::StepWidget => "step",
            NodeKind::StateCapture => "latch",
            NodeKind::Packer => "pack",
            NodeKind::Unpacker => "unpack",
            NodeKind::RoutingHelper => "send",
        }
    }

    /// Inverse of [`wire_name`](Self::wire_name).
    pub fn from_wire_name(name: &str) -> Option<Self> {
        NodeKind::ALL.into_iter().find(|k| k.wire_name() == name)
    }

    /// Checks `params` against this kind's expected shape.
    ///
    /// Shapes are structural (atom classes and arities), not semantic: the
    /// builder is responsible for meaningful values, this check only keeps
    /// malformed parameter lists out of the registry.
    pub(crate) fn check_params(self, params: &[ParamValue]) -> Result<(), String> {
        match self {
            NodeKind::Inlet | NodeKind::Outlet | NodeKind::Gate => {
                if params.is_empty() {
                    Ok(())
                } else {
                    Err(format!("expected no parameters, got {}", params.len()))
                }
            }
            NodeKind::Selector => {
                if params.is_empty() {
                    Err("expected at least one match value".to_string())
                } else if let Some(p) = params.iter().find(|p| !p.is_int()) {
                    Err(format!("match values must be integers, got {p}"))
                } else {
                    Ok(())
                }
            }
            NodeKind::PulseSource => match params {
                [ParamValue::Int(_)] => Ok(()),
                _ => Err("expected a single integer size".to_string()),
            },
            NodeKind::StepWidget => match params {
                [ParamValue::Sym(_), ParamValue::Int(_), ParamValue::Int(_), addr]
                    if addr.is_symbolic() =>
                {
                    Ok(())
                }
                _ => Err("expected style, size, cardinality, address".to_string()),
            },
            NodeKind::StateCapture => match params {
                [ParamValue::Real(_)] => Ok(()),
                _ => Err("expected a single real initial value".to_string()),
            },
            NodeKind::Packer => {
                if params.len() < 2 {
                    Err("expected a tag plus at least one slot".to_string())
                } else if !params[0].is_symbolic() {
                    Err("first slot must be the symbolic trigger tag".to_string())
                } else if let Some(p) = params[1..].iter().find(|p| !p.is_int()) {
                    Err(format!("slot prototypes must be integers, got {p}"))
                } else {
                    Ok(())
                }
            }
            NodeKind::Unpacker => match params {
                [ParamValue::Int(n)] if *n >= 1 => Ok(()),
                _ => Err("expected a positive integer slot count".to_string()),
            },
            NodeKind::RoutingHelper => {
                if params.is_empty() {
                    Err("expected at least one address".to_string())
                } else if let Some(p) = params.iter().find(|p| !p.is_symbolic()) {
                    Err(format!("routing atoms must be symbolic, got {p}"))
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// A node descriptor: kind, truncated canvas position, and parameters.
///
/// Nodes are immutable once created and are only ever created by appending
/// to a [`PatchGraph`](crate::graph::PatchGraph).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identity, equal to the node's insertion index.
    pub id: NodeId,
    /// Role of the node.
    pub kind: NodeKind,
    /// Canvas x position, truncated to an integer at creation.
    pub x: i32,
    /// Canvas y position, truncated to an integer at creation.
    pub y: i32,
    /// Instantiation parameters, fixed at creation.
    pub params: Vec<ParamValue>,
}
