use crate::error::EngineError;
use crate::lookup::{ChallengeLookup, ChildLookup, ContextIndex, ContextLookup, NodeLookup};
use prooftree_types::{Challenge, Node, NodeId};
use std::collections::BTreeMap;
use tracing::debug;

/// In-memory snapshot of a proof: nodes, challenges and the names the
/// context references resolve against.
///
/// Nodes are kept in id order, so every parent is visited before its
/// descendants.
#[derive(Clone, Debug, Default)]
pub struct ProofState {
    nodes: BTreeMap<NodeId, Node>,
    challenges: BTreeMap<String, Challenge>,
    context: ContextIndex,
}

impl ProofState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: ContextIndex) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn insert_node(&mut self, node: Node) -> Result<(), EngineError> {
        if self.nodes.contains_key(&node.id) {
            return Err(EngineError::DuplicateNode(node.id));
        }
        debug!(node = %node.id, node_type = %node.node_type, "node added");
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn node(&self, id: &NodeId) -> Result<&Node, EngineError> {
        self.nodes
            .get(id)
            .ok_or_else(|| EngineError::NodeNotFound(id.clone()))
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node, EngineError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| EngineError::NodeNotFound(id.clone()))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Strict descendants of `id`, in id order.
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|k| id.is_ancestor_of(k))
            .cloned()
            .collect()
    }

    /// Add a challenge. Its target must exist and its id must be new.
    pub fn insert_challenge(&mut self, challenge: Challenge) -> Result<(), EngineError> {
        if !self.nodes.contains_key(&challenge.target_id) {
            return Err(EngineError::NodeNotFound(challenge.target_id));
        }
        if self.challenges.contains_key(&challenge.id) {
            return Err(EngineError::DuplicateChallenge(challenge.id));
        }
        debug!(challenge = %challenge.id, target = %challenge.target_id, aspect = %challenge.target, "challenge raised");
        self.challenges.insert(challenge.id.clone(), challenge);
        Ok(())
    }

    pub fn challenge(&self, id: &str) -> Result<&Challenge, EngineError> {
        self.challenges
            .get(id)
            .ok_or_else(|| EngineError::ChallengeNotFound(id.to_string()))
    }

    pub fn challenge_mut(&mut self, id: &str) -> Result<&mut Challenge, EngineError> {
        self.challenges
            .get_mut(id)
            .ok_or_else(|| EngineError::ChallengeNotFound(id.to_string()))
    }

    pub fn challenges(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.values()
    }

    pub fn open_challenges_for(&self, id: &NodeId) -> Vec<&Challenge> {
        self.challenges_for(id)
            .into_iter()
            .filter(|c| c.is_open())
            .collect()
    }

    pub fn context(&self) -> &ContextIndex {
        &self.context
    }

    pub fn add_definition(&mut self, name: impl Into<String>) {
        self.context.definitions.insert(name.into());
    }

    pub fn add_assumption(&mut self, name: impl Into<String>) {
        self.context.assumptions.insert(name.into());
    }

    pub fn add_external(&mut self, name: impl Into<String>) {
        self.context.externals.insert(name.into());
    }
}

impl NodeLookup for ProofState {
    fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn all_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }
}

impl ChildLookup for ProofState {
    fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        self.nodes.children_of(id)
    }
}

impl ChallengeLookup for ProofState {
    fn challenges_for(&self, id: &NodeId) -> Vec<&Challenge> {
        self.challenges
            .values()
            .filter(|c| &c.target_id == id)
            .collect()
    }
}

impl ContextLookup for ProofState {
    fn has_definition(&self, name: &str) -> bool {
        self.context.has_definition(name)
    }

    fn has_assumption(&self, name: &str) -> bool {
        self.context.has_assumption(name)
    }

    fn has_external(&self, name: &str) -> bool {
        self.context.has_external(name)
    }
}
