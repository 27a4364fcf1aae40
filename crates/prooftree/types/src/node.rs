use crate::error::TypesError;
use crate::hash::{ContentHash, ContentHasher};
use crate::id::NodeId;
use crate::state::{EpistemicState, InferenceRule, NodeType, TaintState, WorkflowState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single proof step.
///
/// `content_hash` always equals [`Node::compute_content_hash`] for a node built
/// through [`NodeDraft`]. The hash covers the logical content only: the node's
/// own id, its workflow/epistemic/taint state and all timestamps are excluded,
/// so two nodes stating the same thing in the same way hash identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub statement: String,
    /// Optional rendering hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,
    pub inference: InferenceRule,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_deps: Vec<NodeId>,
    pub workflow_state: WorkflowState,
    pub epistemic_state: EpistemicState,
    pub taint_state: TaintState,
    pub content_hash: ContentHash,
    pub created: DateTime<Utc>,
    /// Ids (as strings) of the local assumptions this step relies on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
}

impl Node {
    /// Start building a node. The hash is computed by [`NodeDraft::build`].
    pub fn draft(
        id: NodeId,
        node_type: NodeType,
        statement: impl Into<String>,
        inference: InferenceRule,
    ) -> NodeDraft {
        NodeDraft {
            id,
            node_type,
            statement: statement.into(),
            latex: None,
            inference,
            context: Vec::new(),
            dependencies: Vec::new(),
            validation_deps: Vec::new(),
            scope: Vec::new(),
            created: None,
        }
    }

    /// Build a node with no references.
    pub fn new(
        id: NodeId,
        node_type: NodeType,
        statement: impl Into<String>,
        inference: InferenceRule,
    ) -> Result<Self, TypesError> {
        Self::draft(id, node_type, statement, inference).build()
    }

    /// Canonical content hash over
    /// `type, statement, latex?, inference, sorted(context), sorted(deps), sorted(validation_deps)`.
    pub fn content_hash_of(
        node_type: NodeType,
        statement: &str,
        latex: Option<&str>,
        inference: InferenceRule,
        context: &[String],
        dependencies: &[NodeId],
        validation_deps: &[NodeId],
    ) -> ContentHash {
        ContentHasher::new()
            .field("type", node_type.as_str())
            .field("statement", statement)
            .field("latex", latex.unwrap_or_default())
            .field("inference", inference.as_str())
            .sorted_field("context", context)
            .sorted_field("dependencies", dependencies.iter().map(NodeId::to_string))
            .sorted_field("validation_deps", validation_deps.iter().map(NodeId::to_string))
            .finish()
    }

    pub fn compute_content_hash(&self) -> ContentHash {
        Self::content_hash_of(
            self.node_type,
            &self.statement,
            self.latex.as_deref(),
            self.inference,
            &self.context,
            &self.dependencies,
            &self.validation_deps,
        )
    }

    /// Check the stored hash against the node's current content.
    pub fn verify_content_hash(&self) -> Result<(), TypesError> {
        let computed = self.compute_content_hash();
        if computed != self.content_hash {
            return Err(TypesError::HashMismatch {
                expected: self.content_hash.to_hex(),
                computed: computed.to_hex(),
            });
        }
        Ok(())
    }

    /// Recompute the stored hash after editing content fields directly.
    pub fn refresh_content_hash(&mut self) {
        self.content_hash = self.compute_content_hash();
    }

    pub fn depth(&self) -> usize {
        self.id.depth()
    }

    pub fn claim(&mut self, owner: impl Into<String>, at: DateTime<Utc>) -> Result<(), TypesError> {
        let owner = owner.into();
        if owner.trim().is_empty() {
            return Err(TypesError::InvalidInput("claim owner is blank".into()));
        }
        self.transition_workflow(WorkflowState::Claimed)?;
        self.claimed_by = Some(owner);
        self.claimed_at = Some(at);
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), TypesError> {
        if self.workflow_state != WorkflowState::Claimed {
            return Err(self.workflow_error(WorkflowState::Available));
        }
        self.transition_workflow(WorkflowState::Available)?;
        self.claimed_by = None;
        self.claimed_at = None;
        Ok(())
    }

    pub fn block(&mut self) -> Result<(), TypesError> {
        self.transition_workflow(WorkflowState::Blocked)?;
        self.claimed_by = None;
        self.claimed_at = None;
        Ok(())
    }

    pub fn unblock(&mut self) -> Result<(), TypesError> {
        if self.workflow_state != WorkflowState::Blocked {
            return Err(self.workflow_error(WorkflowState::Available));
        }
        self.transition_workflow(WorkflowState::Available)
    }

    pub fn is_claimed_by(&self, owner: &str) -> bool {
        self.workflow_state == WorkflowState::Claimed && self.claimed_by.as_deref() == Some(owner)
    }

    fn transition_workflow(&mut self, to: WorkflowState) -> Result<(), TypesError> {
        if !self.workflow_state.can_transition_to(to) {
            return Err(self.workflow_error(to));
        }
        self.workflow_state = to;
        Ok(())
    }

    fn workflow_error(&self, to: WorkflowState) -> TypesError {
        TypesError::InvalidTransition {
            what: "workflow",
            from: self.workflow_state.to_string(),
            to: to.to_string(),
        }
    }

    /// Move the node to a new epistemic state.
    ///
    /// This only checks the transition table. Whether the tree is consistent
    /// enough for a node to become validated is decided by the engine.
    pub fn set_epistemic(&mut self, to: EpistemicState) -> Result<(), TypesError> {
        if !self.epistemic_state.can_transition_to(to) {
            return Err(TypesError::InvalidTransition {
                what: "epistemic",
                from: self.epistemic_state.to_string(),
                to: to.to_string(),
            });
        }
        self.epistemic_state = to;
        Ok(())
    }

    pub fn set_taint(&mut self, taint: TaintState) {
        self.taint_state = taint;
    }
}

/// Builder for [`Node`]. Reference lists keep first-seen order and drop duplicates.
#[derive(Clone, Debug)]
pub struct NodeDraft {
    id: NodeId,
    node_type: NodeType,
    statement: String,
    latex: Option<String>,
    inference: InferenceRule,
    context: Vec<String>,
    dependencies: Vec<NodeId>,
    validation_deps: Vec<NodeId>,
    scope: Vec<String>,
    created: Option<DateTime<Utc>>,
}

impl NodeDraft {
    pub fn latex(mut self, latex: impl Into<String>) -> Self {
        let latex = latex.into();
        self.latex = (!latex.is_empty()).then_some(latex);
        self
    }

    pub fn context<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.context, refs.into_iter().map(Into::into));
        self
    }

    pub fn dependencies(mut self, deps: impl IntoIterator<Item = NodeId>) -> Self {
        extend_unique(&mut self.dependencies, deps);
        self
    }

    pub fn validation_deps(mut self, deps: impl IntoIterator<Item = NodeId>) -> Self {
        extend_unique(&mut self.validation_deps, deps);
        self
    }

    pub fn scope<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.scope, refs.into_iter().map(Into::into));
        self
    }

    /// Pin the creation time (ledger replay). Defaults to now.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created = Some(at);
        self
    }

    pub fn build(self) -> Result<Node, TypesError> {
        if self.id.is_zero() {
            return Err(TypesError::invalid_id("", "node id must not be zero"));
        }
        if self.statement.trim().is_empty() {
            return Err(TypesError::InvalidInput(format!("node {} has a blank statement", self.id)));
        }
        if let Some(dep) = self.dependencies.iter().chain(&self.validation_deps).find(|d| d.is_zero()) {
            return Err(TypesError::invalid_id(&dep.to_string(), format!("node {} references the zero id", self.id)));
        }
        let content_hash = Node::content_hash_of(
            self.node_type,
            &self.statement,
            self.latex.as_deref(),
            self.inference,
            &self.context,
            &self.dependencies,
            &self.validation_deps,
        );
        Ok(Node {
            id: self.id,
            node_type: self.node_type,
            statement: self.statement,
            latex: self.latex,
            inference: self.inference,
            context: self.context,
            dependencies: self.dependencies,
            validation_deps: self.validation_deps,
            workflow_state: WorkflowState::Available,
            epistemic_state: EpistemicState::Pending,
            taint_state: TaintState::Unresolved,
            content_hash,
            created: self.created.unwrap_or_else(Utc::now),
            scope: self.scope,
            claimed_by: None,
            claimed_at: None,
        })
    }
}

fn extend_unique<T: PartialEq>(target: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
