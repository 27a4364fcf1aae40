//! Property tests: cycle detection agrees with a reachability oracle.
//!
//! `detect_cycle(s)` reports a cycle iff `s` has a dependency path back to
//! itself, and the path starts and ends at `s`. `find_reachable_cycle(s)`
//! reports one iff any cycle is reachable from `s`. Every reported path is
//! closed and follows real dependency edges. Missing dependencies never create
//! a cycle.

use prooftree_engine::{CycleDetector, ProofState};
use prooftree_tests::{claim, id, state_of};
use prooftree_types::NodeId;
use proptest::prelude::*;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Adjacency lists over `n` nodes. Targets `>= n` are dangling references.
fn arb_graph() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..12).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0..n + 2, 0..3), n))
}

fn name(i: usize) -> String {
    format!("1.{}", i + 1)
}

fn to_state(graph: &[Vec<usize>]) -> ProofState {
    state_of(graph.iter().enumerate().map(|(i, deps)| {
        let deps: Vec<String> = deps.iter().map(|&d| name(d)).collect();
        let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
        claim(&name(i), &deps)
    }))
}

/// Nodes reachable from `start` in one or more steps, ignoring dangling edges.
fn reachable(graph: &[Vec<usize>], start: usize) -> HashSet<usize> {
    let mut seen = HashSet::new();
    let mut stack: Vec<usize> = graph[start].iter().copied().filter(|&d| d < graph.len()).collect();
    while let Some(v) = stack.pop() {
        if seen.insert(v) {
            stack.extend(graph[v].iter().copied().filter(|&d| d < graph.len()));
        }
    }
    seen
}

fn on_cycle(graph: &[Vec<usize>], v: usize) -> bool {
    reachable(graph, v).contains(&v)
}

fn cycle_reachable(graph: &[Vec<usize>], start: usize) -> bool {
    on_cycle(graph, start) || reachable(graph, start).into_iter().any(|v| on_cycle(graph, v))
}

fn index(id: &NodeId) -> usize {
    id.components()[1] as usize - 1
}

fn path_follows_edges(graph: &[Vec<usize>], path: &[NodeId]) -> bool {
    path.windows(2).all(|w| graph[index(&w[0])].contains(&index(&w[1])))
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn detect_cycle_matches_oracle(graph in arb_graph(), pick in any::<prop::sample::Index>()) {
        let state = to_state(&graph);
        let start = pick.index(graph.len());
        let result = CycleDetector::new(&state).detect_cycle(&id(&name(start)));

        prop_assert_eq!(result.has_cycle, on_cycle(&graph, start));
        if result.has_cycle {
            prop_assert!(result.path.len() >= 2);
            prop_assert_eq!(result.path.first(), Some(&id(&name(start))));
            prop_assert_eq!(result.path.last(), Some(&id(&name(start))));
            prop_assert!(path_follows_edges(&graph, &result.path));
        } else {
            prop_assert!(result.path.is_empty());
        }
    }

    #[test]
    fn reachable_cycle_matches_oracle(graph in arb_graph(), pick in any::<prop::sample::Index>()) {
        let state = to_state(&graph);
        let start = pick.index(graph.len());
        let result = CycleDetector::new(&state).find_reachable_cycle(&id(&name(start)));

        prop_assert_eq!(result.has_cycle, cycle_reachable(&graph, start));
        if result.has_cycle {
            prop_assert_eq!(result.path.first(), result.path.last());
            prop_assert!(path_follows_edges(&graph, &result.path));
        }
    }

    #[test]
    fn sweep_reports_disjoint_closed_cycles(graph in arb_graph()) {
        let state = to_state(&graph);
        let cycles = CycleDetector::new(&state).validate_all();
        let any_cycle = (0..graph.len()).any(|v| on_cycle(&graph, v));
        prop_assert_eq!(!cycles.is_empty(), any_cycle);

        let mut seen: HashSet<NodeId> = HashSet::new();
        for cycle in &cycles {
            prop_assert_eq!(cycle.path.first(), cycle.path.last());
            prop_assert!(path_follows_edges(&graph, &cycle.path));
            for node in &cycle.path[1..] {
                prop_assert!(seen.insert(node.clone()), "node {} reported twice", node);
            }
        }
    }

    #[test]
    fn dangling_edges_alone_never_cycle(n in 1usize..10, extra in 1usize..5) {
        // every node points only past the end of the node set
        let graph: Vec<Vec<usize>> = (0..n).map(|_| vec![n + extra - 1]).collect();
        let state = to_state(&graph);
        prop_assert!(CycleDetector::new(&state).validate_all().is_empty());
    }
}

#[test]
fn self_loop_is_two_element_cycle() {
    let state = state_of([claim("1.1", &["1.1"])]);
    let result = CycleDetector::new(&state).detect_cycle(&id("1.1"));
    assert_eq!(result.path, vec![id("1.1"), id("1.1")]);
}

#[test]
fn node_above_a_cycle_is_not_on_it() {
    let state = state_of([claim("1", &["1.1"]), claim("1.1", &["1.2"]), claim("1.2", &["1.1"])]);
    let detector = CycleDetector::new(&state);
    assert!(!detector.detect_cycle(&id("1")).has_cycle);
    assert!(detector.find_reachable_cycle(&id("1")).has_cycle);
}
