//! Shared fixtures for the cross-crate proof-tree suites.

use prooftree_engine::ProofState;
use prooftree_types::{EpistemicState, InferenceRule, Node, NodeId, NodeType};
use tracing_subscriber::EnvFilter;

/// Parse an id that the test itself spells out.
pub fn id(s: &str) -> NodeId {
    NodeId::parse(s).unwrap_or_else(|e| panic!("bad test id {:?}: {}", s, e))
}

/// A pending claim with the given dependencies.
pub fn claim(s: &str, deps: &[&str]) -> Node {
    Node::draft(id(s), NodeType::Claim, format!("step {}", s), InferenceRule::ModusPonens)
        .dependencies(deps.iter().map(|d| id(d)))
        .build()
        .unwrap_or_else(|e| panic!("bad test node {}: {}", s, e))
}

/// A node of the given type in the given epistemic state.
pub fn node_in(s: &str, node_type: NodeType, state: EpistemicState) -> Node {
    let mut node = Node::new(id(s), node_type, format!("step {}", s), InferenceRule::ModusPonens)
        .unwrap_or_else(|e| panic!("bad test node {}: {}", s, e));
    if state != EpistemicState::Pending {
        node.set_epistemic(state)
            .unwrap_or_else(|e| panic!("bad test state for {}: {}", s, e));
    }
    node
}

pub fn state_of(nodes: impl IntoIterator<Item = Node>) -> ProofState {
    let mut state = ProofState::new();
    for node in nodes {
        let nid = node.id.clone();
        state
            .insert_node(node)
            .unwrap_or_else(|e| panic!("cannot insert {}: {}", nid, e));
    }
    state
}

/// Route `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
