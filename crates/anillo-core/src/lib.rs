//! Anillo Core - graph model and topology builder for circular sequencer
//! patches.
//!
//! This crate builds declarative dataflow graphs describing circular
//! step-sequencer control surfaces for a visual dataflow host. Construction
//! is a pure, synchronous function of the [`SequencerSpec`]: no I/O, no
//! shared state between builds, and nothing of the host's runtime is
//! simulated — the output is a static topology handed to an emitter.
//!
//! # Core Abstractions
//!
//! - [`PatchGraph`] - append-only node registry + connection set with
//!   monotonic ids and checked references
//! - [`ParamValue`] - typed node parameters (int, real, symbol, string)
//! - [`build_sequencer`] - the ring topology builder
//! - [`ring_positions`] - circular widget placement
//!
//! # Example
//!
//! ```rust
//! use anillo_core::{SequencerSpec, build_sequencer};
//!
//! let spec = SequencerSpec {
//!     steps: 8,
//!     rotation: true,
//!     ..SequencerSpec::default()
//! };
//! let graph = build_sequencer(&spec).unwrap();
//! assert_eq!(graph.nodes_of_kind(anillo_core::NodeKind::StepWidget).count(), 8);
//! ```

pub mod builder;
pub mod connection;
pub mod graph;
pub mod node;
pub mod param;
pub mod ring;

pub use builder::{BuildError, SCOPE_TOKEN, SequencerSpec, WidgetStyle, build_sequencer, step_address};
pub use connection::Connection;
pub use graph::{GraphError, PatchGraph};
pub use node::{Node, NodeId, NodeKind};
pub use param::ParamValue;
pub use ring::{ring_angles, ring_positions};
