//! Closed sum types for the per-node tags: node type, inference rule, and the
//! three independent state axes (workflow, epistemic, taint).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural role of a proof step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Claim,
    LocalAssume,
    LocalDischarge,
    Case,
    Qed,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::LocalAssume => "local_assume",
            Self::LocalDischarge => "local_discharge",
            Self::Case => "case",
            Self::Qed => "qed",
        }
    }

    /// Does this node open a local-assumption scope?
    pub fn opens_scope(&self) -> bool {
        matches!(self, Self::LocalAssume)
    }

    pub fn closes_scope(&self) -> bool {
        matches!(self, Self::LocalDischarge)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inference rule justifying a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceRule {
    ModusPonens,
    ModusTollens,
    UniversalInstantiation,
    UniversalGeneralization,
    ExistentialInstantiation,
    ExistentialGeneralization,
    ByDefinition,
    Assumption,
    LocalAssume,
    LocalDischarge,
    Contradiction,
}

impl InferenceRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModusPonens => "modus_ponens",
            Self::ModusTollens => "modus_tollens",
            Self::UniversalInstantiation => "universal_instantiation",
            Self::UniversalGeneralization => "universal_generalization",
            Self::ExistentialInstantiation => "existential_instantiation",
            Self::ExistentialGeneralization => "existential_generalization",
            Self::ByDefinition => "by_definition",
            Self::Assumption => "assumption",
            Self::LocalAssume => "local_assume",
            Self::LocalDischarge => "local_discharge",
            Self::Contradiction => "contradiction",
        }
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who currently owns work on a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Available,
    Claimed,
    Blocked,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Claimed => "claimed",
            Self::Blocked => "blocked",
        }
    }

    pub fn can_transition_to(&self, to: WorkflowState) -> bool {
        use WorkflowState::*;
        matches!(
            (*self, to),
            (Available, Claimed)
                | (Claimed, Available)
                | (Available, Blocked)
                | (Claimed, Blocked)
                | (Blocked, Available)
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification status of a node's claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpistemicState {
    #[default]
    Pending,
    Validated,
    Admitted,
    Refuted,
    Archived,
}

impl EpistemicState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::Admitted => "admitted",
            Self::Refuted => "refuted",
            Self::Archived => "archived",
        }
    }

    /// Pending moves to any settled state; settled states may only be archived.
    pub fn can_transition_to(&self, to: EpistemicState) -> bool {
        use EpistemicState::*;
        match self {
            Pending => to != Pending,
            Validated | Admitted | Refuted => to == Archived,
            Archived => false,
        }
    }

    /// Accepted for the purpose of a parent's validation.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Validated | Self::Admitted)
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for EpistemicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a result rests on something unverified or self-admitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaintState {
    Clean,
    SelfAdmitted,
    Tainted,
    #[default]
    Unresolved,
}

impl TaintState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::SelfAdmitted => "self_admitted",
            Self::Tainted => "tainted",
            Self::Unresolved => "unresolved",
        }
    }

    /// Does this taint spread to descendants?
    pub fn propagates(&self) -> bool {
        matches!(self, Self::SelfAdmitted | Self::Tainted)
    }
}

impl fmt::Display for TaintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
