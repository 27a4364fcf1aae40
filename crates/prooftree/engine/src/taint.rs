//! Taint: whether a result rests on something unverified.

use crate::error::EngineError;
use crate::state::ProofState;
use prooftree_types::{EpistemicState, Node, NodeId, TaintState};
use tracing::debug;

/// Taint of `node` given its ancestors in the id hierarchy.
///
/// A pending node, or one under a pending ancestor, is unresolved. An admitted
/// node is self-admitted. Below a self-admitted or tainted ancestor a node is
/// tainted. Everything else is clean.
pub fn compute_taint(node: &Node, ancestors: &[&Node]) -> TaintState {
    let pending = |n: &Node| n.epistemic_state == EpistemicState::Pending;
    if pending(node) || ancestors.iter().any(|a| pending(*a)) {
        return TaintState::Unresolved;
    }
    if node.epistemic_state == EpistemicState::Admitted {
        return TaintState::SelfAdmitted;
    }
    if ancestors.iter().any(|a| a.taint_state.propagates()) {
        return TaintState::Tainted;
    }
    TaintState::Clean
}

/// Recompute taint for `from` and every descendant, parents first. Returns
/// the ids whose taint changed.
pub fn propagate_taint(state: &mut ProofState, from: &NodeId) -> Result<Vec<NodeId>, EngineError> {
    state.node(from)?;
    let mut targets = vec![from.clone()];
    targets.extend(state.descendants(from));

    let mut changed = Vec::new();
    for id in targets {
        let taint = {
            let node = state.node(&id)?;
            let ancestors = id.ancestors();
            let ancestors: Vec<&Node> = ancestors.iter().filter_map(|a| state.node(a).ok()).collect();
            compute_taint(node, &ancestors)
        };
        let node = state.node_mut(&id)?;
        if node.taint_state != taint {
            debug!(node = %id, from = %node.taint_state, to = %taint, "taint changed");
            node.set_taint(taint);
            changed.push(id);
        }
    }
    Ok(changed)
}
