//! Narrow read capabilities the engine needs from whatever store holds the
//! proof tree. The engine never owns nodes or challenges; it borrows them
//! through these traits for the duration of a single check.

use prooftree_types::{Challenge, Node, NodeId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

/// Fetch nodes by id and enumerate the whole node set.
pub trait NodeLookup {
    fn get_node(&self, id: &NodeId) -> Option<&Node>;

    fn all_nodes(&self) -> Vec<&Node>;
}

/// Direct children of a node in the id hierarchy.
pub trait ChildLookup {
    fn children_of(&self, id: &NodeId) -> Vec<&Node>;
}

/// Challenges whose target is a given node.
pub trait ChallengeLookup {
    fn challenges_for(&self, id: &NodeId) -> Vec<&Challenge>;
}

/// Resolution of context references against the known definitions,
/// assumptions and externals.
pub trait ContextLookup {
    fn has_definition(&self, name: &str) -> bool;

    fn has_assumption(&self, name: &str) -> bool;

    fn has_external(&self, name: &str) -> bool;
}

fn direct_children<'a>(nodes: impl Iterator<Item = &'a Node>, id: &NodeId) -> Vec<&'a Node> {
    let mut children: Vec<&Node> = nodes.filter(|n| n.id.parent().as_ref() == Some(id)).collect();
    children.sort_by(|a, b| a.id.cmp(&b.id));
    children
}

impl NodeLookup for BTreeMap<NodeId, Node> {
    fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.get(id)
    }

    fn all_nodes(&self) -> Vec<&Node> {
        self.values().collect()
    }
}

impl ChildLookup for BTreeMap<NodeId, Node> {
    fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        // Descendants of `id` sort contiguously right after it.
        self.range((Bound::Excluded(id.clone()), Bound::Unbounded))
            .take_while(|(k, _)| id.is_ancestor_of(k))
            .filter(|(k, _)| k.depth() == id.depth() + 1)
            .map(|(_, n)| n)
            .collect()
    }
}

impl NodeLookup for HashMap<NodeId, Node> {
    fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.get(id)
    }

    fn all_nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }
}

impl ChildLookup for HashMap<NodeId, Node> {
    fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        direct_children(self.values(), id)
    }
}

impl NodeLookup for [Node] {
    fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.iter().find(|n| &n.id == id)
    }

    fn all_nodes(&self) -> Vec<&Node> {
        self.iter().collect()
    }
}

impl ChildLookup for [Node] {
    fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        direct_children(self.iter(), id)
    }
}

impl NodeLookup for Vec<Node> {
    fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.as_slice().get_node(id)
    }

    fn all_nodes(&self) -> Vec<&Node> {
        self.as_slice().all_nodes()
    }
}

impl ChildLookup for Vec<Node> {
    fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        self.as_slice().children_of(id)
    }
}

impl ChallengeLookup for [Challenge] {
    fn challenges_for(&self, id: &NodeId) -> Vec<&Challenge> {
        self.iter().filter(|c| &c.target_id == id).collect()
    }
}

impl ChallengeLookup for Vec<Challenge> {
    fn challenges_for(&self, id: &NodeId) -> Vec<&Challenge> {
        self.as_slice().challenges_for(id)
    }
}

/// Name sets for the three kinds of context reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextIndex {
    pub definitions: BTreeSet<String>,
    pub assumptions: BTreeSet<String>,
    pub externals: BTreeSet<String>,
}

impl ContextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_assumptions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assumptions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_externals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.externals.extend(names.into_iter().map(Into::into));
        self
    }
}

impl ContextLookup for ContextIndex {
    fn has_definition(&self, name: &str) -> bool {
        self.definitions.contains(name)
    }

    fn has_assumption(&self, name: &str) -> bool {
        self.assumptions.contains(name)
    }

    fn has_external(&self, name: &str) -> bool {
        self.externals.contains(name)
    }
}
