//! Sequencer topology builder.
//!
//! Turns a [`SequencerSpec`] into a complete [`PatchGraph`]: a selector
//! dispatching the incoming step index, a ring of step widgets each gated
//! onto one shared outlet, and the optional bulk-set, capture, and rotation
//! subsystems. The wiring pattern is identical for every step count and
//! style — only ring cardinality and canvas coordinates vary, and the one
//! degenerate case (a single-step ring) falls out of the same arithmetic.
//!
//! Creation order is fixed: selector, inlets, bulk-set plumbing, the
//! widget/gate pairs in ring order, outlet (and latch), rotation subsystem.
//! Connections are appended only after both endpoints exist, so the
//! registry's no-forward-reference check holds at every step of the build.

use crate::graph::{GraphError, PatchGraph};
use crate::node::{NodeId, NodeKind};
use crate::param::ParamValue;
use crate::ring::ring_positions;

/// Canvas center of the ring.
const CENTER: (f64, f64) = (200.0, 200.0);
/// Radius of the outer (widget) ring.
const WIDGET_RADIUS: f64 = 170.0;
/// Radius of the inner (gate) ring; shares the widget ring's angle set.
const GATE_RADIUS: f64 = 145.0;
/// Side of a step widget on the canvas.
const WIDGET_SIZE: f64 = 30.0;
/// Side of a gate on the canvas.
const GATE_SIZE: f64 = 15.0;
/// Side of a rotation trigger.
const TRIGGER_SIZE: i64 = 15;

/// Instantiation-scope token appended to addresses when namespacing is on.
/// The host resolves it to an instance-unique value at load time.
pub const SCOPE_TOKEN: &str = "$0";

/// Interactive control style for the ring's steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidgetStyle {
    /// Binary on/off toggle; cardinality is fixed at 2.
    #[default]
    Toggle,
    /// M-state cycling button; each activation advances the state mod M.
    CyclicButton,
}

impl WidgetStyle {
    /// Style tag carried in each step widget's parameter list.
    pub fn tag(self) -> &'static str {
        match self {
            WidgetStyle::Toggle => "tgl",
            WidgetStyle::CyclicButton => "cyc",
        }
    }
}

/// Everything that varies between generated sequencers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerSpec {
    /// Number of steps on the ring. Must be at least 1.
    pub steps: usize,
    /// Per-step state cardinality. Must be positive; [`WidgetStyle::Toggle`]
    /// requires exactly 2.
    pub cardinality: u32,
    /// Interactive control style.
    pub style: WidgetStyle,
    /// Build the forward/backward rotation subsystem.
    pub rotation: bool,
    /// Suffix every step address with [`SCOPE_TOKEN`] so simultaneously
    /// loaded instances cannot cross-talk.
    pub namespaced: bool,
    /// Build the bulk-state inlet path (set all steps from one message).
    pub settable: bool,
    /// Insert a value latch in front of the outlet so it always holds the
    /// last value that passed, decoupling reads from pulse timing.
    pub latched: bool,
}

impl Default for SequencerSpec {
    fn default() -> Self {
        Self {
            steps: 16,
            cardinality: 2,
            style: WidgetStyle::Toggle,
            rotation: false,
            namespaced: false,
            settable: false,
            latched: false,
        }
    }
}

/// Errors reported before any node is created.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A ring needs at least one step.
    #[error("step count must be at least 1, got {0}")]
    InvalidStepCount(usize),
    /// The style/cardinality combination is not supported.
    #[error("cardinality {cardinality} is not supported for {style:?}")]
    InvalidCardinality {
        /// Requested style.
        style: WidgetStyle,
        /// Requested cardinality.
        cardinality: u32,
    },
    /// Internal wiring defect surfaced by the registry. Unreachable from
    /// valid input.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl SequencerSpec {
    /// Validates the parameter combination without building anything.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.steps < 1 {
            return Err(BuildError::InvalidStepCount(self.steps));
        }
        match (self.style, self.cardinality) {
            (_, 0) | (WidgetStyle::Toggle, 1 | 3..) => Err(BuildError::InvalidCardinality {
                style: self.style,
                cardinality: self.cardinality,
            }),
            _ => Ok(()),
        }
    }
}

/// The receive address for step `index`.
///
/// Addresses are unique within one graph by construction (one per index);
/// with `namespaced` the scope token makes them unique across instances
/// once the host resolves it.
pub fn step_address(index: usize, namespaced: bool) -> String {
    if namespaced {
        format!("rcv_tgl_{index}_{SCOPE_TOKEN}")
    } else {
        format!("rcv_tgl_{index}")
    }
}

/// Builds the full sequencer graph for `spec`.
///
/// The only user-facing failures are the parameter checks in
/// [`SequencerSpec::validate`]; they abort before the first node exists, so
/// there is never a partially built graph.
pub fn build_sequencer(spec: &SequencerSpec) -> Result<PatchGraph, BuildError> {
    spec.validate()?;
    tracing::debug!(
        steps = spec.steps,
        cardinality = spec.cardinality,
        style = ?spec.style,
        "building sequencer graph"
    );
    RingBuilder {
        spec,
        graph: PatchGraph::new(),
        widgets: Vec::with_capacity(spec.steps),
        gates: Vec::with_capacity(spec.steps),
    }
    .build()
}

struct RingBuilder<'a> {
    spec: &'a SequencerSpec,
    graph: PatchGraph,
    widgets: Vec<NodeId>,
    gates: Vec<NodeId>,
}

impl RingBuilder<'_> {
    fn build(mut self) -> Result<PatchGraph, BuildError> {
        let selector = self.add_selector()?;
        self.add_index_inlet(selector)?;
        if self.spec.settable {
            self.add_bulk_set_path()?;
        }
        self.add_ring(selector)?;
        self.add_outlet_stage()?;
        if self.spec.rotation {
            self.add_rotation()?;
        }
        Ok(self.graph)
    }

    fn address(&self, index: usize) -> String {
        step_address(index, self.spec.namespaced)
    }

    /// One selector with a match value (and thus an outlet) per ring index.
    fn add_selector(&mut self) -> Result<NodeId, GraphError> {
        let matches = (0..self.spec.steps)
            .map(|i| ParamValue::Int(i as i64))
            .collect();
        self.graph.add_node(NodeKind::Selector, 20, 500, matches)
    }

    fn add_index_inlet(&mut self, selector: NodeId) -> Result<(), GraphError> {
        let inlet = self.graph.add_node(NodeKind::Inlet, 20, 450, vec![])?;
        self.graph.connect(inlet, 0, selector, 0)
    }

    /// Second inlet plus the scatter stage that fans a bulk state message
    /// out to every step's receive address. `$n` picks the n-th element of
    /// the incoming message; the addresses carry the scope token when
    /// namespacing is on, which is what keeps two loaded instances apart.
    fn add_bulk_set_path(&mut self) -> Result<(), GraphError> {
        let set_inlet = self.graph.add_node(NodeKind::Inlet, 100, 450, vec![])?;
        let pairs = (0..self.spec.steps)
            .flat_map(|i| {
                [
                    ParamValue::sym(self.address(i)),
                    ParamValue::sym(format!("${}", i + 1)),
                ]
            })
            .collect();
        let scatter = self
            .graph
            .add_node(NodeKind::RoutingHelper, 100, 500, pairs)?;
        self.graph.connect(set_inlet, 0, scatter, 0)
    }

    /// The widget/gate pairs in ring order. Widget value feeds the gate's
    /// data inlet; the selector pulse for the same index opens the gate.
    fn add_ring(&mut self, selector: NodeId) -> Result<(), GraphError> {
        let n = self.spec.steps;
        let widget_pos = ring_positions(n, CENTER, WIDGET_RADIUS, WIDGET_SIZE);
        let gate_pos = ring_positions(n, CENTER, GATE_RADIUS, GATE_SIZE);
        for i in 0..n {
            let (wx, wy) = widget_pos[i];
            let widget = self.graph.add_node(
                NodeKind::StepWidget,
                wx as i32,
                wy as i32,
                vec![
                    ParamValue::sym(self.spec.style.tag()),
                    ParamValue::Int(WIDGET_SIZE as i64),
                    ParamValue::Int(i64::from(self.spec.cardinality)),
                    ParamValue::sym(self.address(i)),
                ],
            )?;
            let (gx, gy) = gate_pos[i];
            let gate = self
                .graph
                .add_node(NodeKind::Gate, gx as i32, gy as i32, vec![])?;
            self.graph.connect(widget, 0, gate, 0)?;
            self.graph.connect(selector, i as u32, gate, 1)?;
            self.widgets.push(widget);
            self.gates.push(gate);
        }
        Ok(())
    }

    /// The shared outlet, optionally behind a value latch. All gates fan
    /// into the same sink; only the selected step's gate is open, so at
    /// most one value arrives per index pulse.
    fn add_outlet_stage(&mut self) -> Result<(), GraphError> {
        let outlet = self.graph.add_node(NodeKind::Outlet, 800, 500, vec![])?;
        let sink = if self.spec.latched {
            let latch =
                self.graph
                    .add_node(NodeKind::StateCapture, 720, 500, vec![ParamValue::Real(0.0)])?;
            self.graph.connect(latch, 0, outlet, 0)?;
            latch
        } else {
            outlet
        };
        for gate in self.gates.clone() {
            self.graph.connect(gate, 0, sink, 0)?;
        }
        Ok(())
    }

    /// Forward/backward rotation: two packers capture the whole ring's
    /// state behind a trigger tag, one unpacker scatters the shifted state
    /// back through per-step sends.
    ///
    /// Packer inlet 0 is the trigger; data slot j is inlet j + 1. Writing
    /// widget i into slot (i+1) mod N means the unpacked slot j carries the
    /// value of step j's predecessor — a circular shift forward by one.
    /// The backward packer writes into slot (i−1) mod N, the exact inverse
    /// permutation. Wraparound is the modulus; no step is special.
    fn add_rotation(&mut self) -> Result<(), GraphError> {
        let n = self.spec.steps;
        let fwd_trigger = self.pulse(370, 0)?;
        let fwd_packer = self.packer("fwd", 150, 520)?;
        let bwd_trigger = self.pulse(400, 0)?;
        let bwd_packer = self.packer("bwd", 260, 520)?;
        let unpacker = self.graph.add_node(
            NodeKind::Unpacker,
            150,
            560,
            vec![ParamValue::Int(n as i64)],
        )?;
        self.graph.connect(fwd_trigger, 0, fwd_packer, 0)?;
        self.graph.connect(bwd_trigger, 0, bwd_packer, 0)?;
        for i in 0..n {
            let widget = self.widgets[i];
            let fwd_slot = (i + 1) % n;
            let bwd_slot = (i + n - 1) % n;
            self.graph
                .connect(widget, 0, fwd_packer, fwd_slot as u32 + 1)?;
            self.graph
                .connect(widget, 0, bwd_packer, bwd_slot as u32 + 1)?;
        }
        self.graph.connect(fwd_packer, 0, unpacker, 0)?;
        self.graph.connect(bwd_packer, 0, unpacker, 0)?;
        for i in 0..n {
            let send = self.graph.add_node(
                NodeKind::RoutingHelper,
                420,
                10 + 30 * i as i32,
                vec![ParamValue::sym(self.address(i))],
            )?;
            self.graph.connect(unpacker, i as u32, send, 0)?;
        }
        Ok(())
    }

    fn pulse(&mut self, x: i32, y: i32) -> Result<NodeId, GraphError> {
        self.graph
            .add_node(NodeKind::PulseSource, x, y, vec![ParamValue::Int(TRIGGER_SIZE)])
    }

    fn packer(&mut self, tag: &str, x: i32, y: i32) -> Result<NodeId, GraphError> {
        let mut slots = Vec::with_capacity(self.spec.steps + 1);
        slots.push(ParamValue::sym(tag));
        slots.extend((0..self.spec.steps).map(|_| ParamValue::Int(0)));
        self.graph.add_node(NodeKind::Packer, x, y, slots)
    }
}
