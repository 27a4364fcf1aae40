//! The gate in front of the `validated` epistemic state.

use crate::error::EngineError;
use crate::lookup::{ChallengeLookup, ChildLookup};
use prooftree_types::{EpistemicState, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a node cannot be (or stay) validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantFailure {
    pub node: NodeId,
    /// Direct children that are neither validated nor admitted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<(NodeId, EpistemicState)>,
    /// Open challenges as `(challenge id, target)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<(String, NodeId)>,
}

impl InvariantFailure {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.challenges.is_empty()
    }
}

impl fmt::Display for InvariantFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} cannot be validated", self.node)?;
        if !self.children.is_empty() {
            let list: Vec<String> = self
                .children
                .iter()
                .map(|(id, state)| format!("{} ({})", id, state))
                .collect();
            write!(f, "; unaccepted children: {}", list.join(", "))?;
        }
        if !self.challenges.is_empty() {
            let list: Vec<String> = self
                .challenges
                .iter()
                .map(|(ch, target)| format!("{} on {}", ch, target))
                .collect();
            write!(f, "; open challenges: {}", list.join(", "))?;
        }
        Ok(())
    }
}

/// Everything that would block `node` from being validated, regardless of
/// its current state.
///
/// Without a child lookup the children are not checked, and only challenges
/// against `node` itself are considered. With one, open challenges against
/// direct children block as well.
pub fn validation_blockers(
    node: &Node,
    children: Option<&dyn ChildLookup>,
    challenges: Option<&dyn ChallengeLookup>,
) -> Option<InvariantFailure> {
    let mut failure = InvariantFailure {
        node: node.id.clone(),
        children: Vec::new(),
        challenges: Vec::new(),
    };

    let kids = children.map(|c| c.children_of(&node.id)).unwrap_or_default();
    for child in &kids {
        if !child.epistemic_state.is_accepted() {
            failure.children.push((child.id.clone(), child.epistemic_state));
        }
    }

    if let Some(lookup) = challenges {
        let targets = std::iter::once(&node.id).chain(kids.iter().map(|c| &c.id));
        for target in targets {
            for ch in lookup.challenges_for(target) {
                if ch.is_blocking() {
                    failure.challenges.push((ch.id.clone(), ch.target_id.clone()));
                }
            }
        }
    }

    if failure.is_empty() {
        None
    } else {
        Some(failure)
    }
}

/// Check a node whose current state is `validated`. Any other state passes
/// untouched: this is a gate on the transition, not a general scan.
pub fn check_validation_invariants(
    node: &Node,
    children: Option<&dyn ChildLookup>,
    challenges: Option<&dyn ChallengeLookup>,
) -> Result<(), EngineError> {
    if node.epistemic_state != EpistemicState::Validated {
        return Ok(());
    }
    match validation_blockers(node, children, challenges) {
        Some(failure) => Err(EngineError::Invariant(failure)),
        None => Ok(()),
    }
}
