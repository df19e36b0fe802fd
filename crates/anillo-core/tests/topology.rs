//! Property tests for the sequencer topology.
//!
//! The rotation subsystem is pure index arithmetic, so its laws are checked
//! over randomized ring sizes and state vectors: applying the forward slot
//! map then the backward slot map to a captured state vector must restore
//! the original vector, for every ring size including the degenerate ones.

use anillo_core::{NodeKind, PatchGraph, SequencerSpec, WidgetStyle, build_sequencer};
use proptest::prelude::*;

/// Recovers the slot permutation of one packer from the built graph:
/// `perm[i] = j` when widget i feeds data slot j.
fn slot_permutation(graph: &PatchGraph, packer_index: usize) -> Vec<usize> {
    let packer = graph
        .nodes_of_kind(NodeKind::Packer)
        .nth(packer_index)
        .expect("rotation graphs have two packers");
    let widgets: Vec<_> = graph
        .nodes_of_kind(NodeKind::StepWidget)
        .map(|w| w.id)
        .collect();
    widgets
        .iter()
        .map(|w| {
            let c = graph
                .connections()
                .iter()
                .find(|c| c.source == *w && c.dest == packer.id)
                .expect("every widget feeds every packer");
            assert!(c.inlet >= 1, "inlet 0 is reserved for the trigger");
            (c.inlet - 1) as usize
        })
        .collect()
}

/// Applies a packer's slot permutation to a state vector: slot `perm[i]`
/// receives the value of step i, and the unpacker sends slot j back to
/// step j.
fn apply(perm: &[usize], state: &[i64]) -> Vec<i64> {
    let mut next = vec![0; state.len()];
    for (i, &slot) in perm.iter().enumerate() {
        next[slot] = state[i];
    }
    next
}

fn rotation_spec(steps: usize) -> SequencerSpec {
    SequencerSpec {
        steps,
        rotation: true,
        ..SequencerSpec::default()
    }
}

proptest! {
    #[test]
    fn forward_then_backward_restores_state(
        steps in 1usize..48,
        seed in any::<u64>(),
    ) {
        let graph = build_sequencer(&rotation_spec(steps)).unwrap();
        let fwd = slot_permutation(&graph, 0);
        let bwd = slot_permutation(&graph, 1);

        // Deterministic pseudo-random state vector from the seed.
        let state: Vec<i64> = (0..steps)
            .map(|i| ((seed >> (i % 48)) & 0xff) as i64)
            .collect();

        let rotated = apply(&fwd, &state);
        let restored = apply(&bwd, &rotated);
        prop_assert_eq!(&restored, &state);

        // And the other way around.
        let rotated = apply(&bwd, &state);
        let restored = apply(&fwd, &rotated);
        prop_assert_eq!(&restored, &state);
    }

    #[test]
    fn forward_moves_every_step_to_its_successor(steps in 2usize..48) {
        let graph = build_sequencer(&rotation_spec(steps)).unwrap();
        let fwd = slot_permutation(&graph, 0);
        let bwd = slot_permutation(&graph, 1);
        for i in 0..steps {
            prop_assert_eq!(fwd[i], (i + 1) % steps);
            prop_assert_eq!(bwd[i], (i + steps - 1) % steps);
        }
    }

    #[test]
    fn every_build_satisfies_the_registry_invariants(
        steps in 1usize..32,
        rotation in any::<bool>(),
        namespaced in any::<bool>(),
        settable in any::<bool>(),
        latched in any::<bool>(),
        cyclic in any::<bool>(),
        cardinality in 1u32..12,
    ) {
        let spec = SequencerSpec {
            steps,
            cardinality: if cyclic { cardinality } else { 2 },
            style: if cyclic { WidgetStyle::CyclicButton } else { WidgetStyle::Toggle },
            rotation,
            namespaced,
            settable,
            latched,
        };
        let graph = build_sequencer(&spec).unwrap();

        // Ids equal insertion order.
        for (i, node) in graph.nodes().iter().enumerate() {
            prop_assert_eq!(node.id.index() as usize, i);
        }
        // No connection references an id outside the registry, and the
        // builder never wires a node to itself.
        let count = graph.node_count() as u32;
        for c in graph.connections() {
            prop_assert!(c.source.index() < count);
            prop_assert!(c.dest.index() < count);
            prop_assert_ne!(c.source, c.dest);
        }
        // The ring census is exact regardless of flags.
        prop_assert_eq!(graph.nodes_of_kind(NodeKind::StepWidget).count(), steps);
        prop_assert_eq!(graph.nodes_of_kind(NodeKind::Gate).count(), steps);
        prop_assert_eq!(graph.nodes_of_kind(NodeKind::Selector).count(), 1);
        prop_assert_eq!(graph.nodes_of_kind(NodeKind::Outlet).count(), 1);
    }

    #[test]
    fn topology_is_isomorphic_across_ring_sizes(a in 1usize..24, b in 1usize..24) {
        // Same flags, different N: the per-kind census must differ only in
        // the ring-proportional kinds, and the connection pattern scales
        // linearly with N.
        let ga = build_sequencer(&rotation_spec(a)).unwrap();
        let gb = build_sequencer(&rotation_spec(b)).unwrap();

        let census = |g: &PatchGraph, kind: NodeKind| g.nodes_of_kind(kind).count();
        for kind in [NodeKind::Selector, NodeKind::Outlet, NodeKind::Packer, NodeKind::Unpacker] {
            prop_assert_eq!(census(&ga, kind), census(&gb, kind));
        }
        for kind in [NodeKind::StepWidget, NodeKind::Gate, NodeKind::RoutingHelper] {
            prop_assert_eq!(census(&ga, kind) * b, census(&gb, kind) * a);
        }
        // Six edges per step (gate wiring plus both packer slots and the
        // unpacker send) and a fixed overhead that must not vary with N.
        let overhead = ga.connection_count() as i64 - 6 * a as i64;
        prop_assert_eq!(overhead, gb.connection_count() as i64 - 6 * b as i64);
        prop_assert_eq!(overhead, 5);
    }
}
