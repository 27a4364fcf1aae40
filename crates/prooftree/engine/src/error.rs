use crate::validation::invariant::InvariantFailure;
use prooftree_types::{ErrorKind, NodeId, TypesError};

/// Errors from graph-consistency checks.
///
/// Each variant maps to one [`ErrorKind`] through [`EngineError::kind`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Types(#[from] TypesError),
    #[error("definition not found: {reference} (referenced by node {node})")]
    DefinitionNotFound { node: NodeId, reference: String },
    #[error("assumption not found: {reference} (referenced by node {node})")]
    AssumptionNotFound { node: NodeId, reference: String },
    #[error("external reference not found: {reference} (referenced by node {node})")]
    ExternalNotFound { node: NodeId, reference: String },
    #[error("node {node} has a blank context reference at position {position}")]
    BlankReference { node: NodeId, position: usize },
    #[error("context reference {reference:?} of node {node} is ambiguous: resolves as {matches}")]
    AmbiguousReference {
        node: NodeId,
        reference: String,
        matches: String,
    },
    #[error("node {node} at depth {depth} exceeds maximum depth {max}")]
    DepthExceeded { node: NodeId, depth: usize, max: usize },
    #[error("{count} challenges exceed the limit of {max}")]
    ChallengeLimitExceeded { count: usize, max: usize },
    #[error("node {node} has {count} refinements, limit is {max}")]
    RefinementLimitExceeded { node: NodeId, count: usize, max: usize },
    #[error("node {node} references scope {reference:?}, which is not an active local assumption")]
    ScopeViolation { node: NodeId, reference: String },
    #[error("{outstanding} local assumption(s) never discharged")]
    ScopeUnclosed { outstanding: usize },
    #[error("local assumption {0} is still active")]
    UndischargedAssumption(NodeId),
    #[error("{count} discharge(s) without a matching local assumption")]
    UnmatchedDischarge { count: usize },
    #[error("scope {0} is already open")]
    ScopeAlreadyOpen(NodeId),
    #[error("no scope entry for {0}")]
    ScopeNotFound(NodeId),
    #[error("dependency cycle: {}", render_path(.path))]
    DependencyCycle { path: Vec<NodeId> },
    #[error("{0}")]
    Invariant(InvariantFailure),
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("node {node} depends on missing node {missing}")]
    DanglingDependency { node: NodeId, missing: NodeId },
    #[error("node already exists: {0}")]
    DuplicateNode(NodeId),
    #[error("challenge not found: {0}")]
    ChallengeNotFound(String),
    #[error("challenge already exists: {0}")]
    DuplicateChallenge(String),
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("config error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Types(e) => e.kind(),
            Self::DefinitionNotFound { .. } => ErrorKind::DefNotFound,
            Self::AssumptionNotFound { .. } => ErrorKind::AssumptionNotFound,
            Self::ExternalNotFound { .. } => ErrorKind::ExternalNotFound,
            Self::BlankReference { .. } => ErrorKind::InvalidInput,
            Self::AmbiguousReference { .. } => ErrorKind::AmbiguousRef,
            Self::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            Self::ChallengeLimitExceeded { .. } => ErrorKind::ChallengeLimitExceeded,
            Self::RefinementLimitExceeded { .. } => ErrorKind::RefinementLimitExceeded,
            Self::ScopeViolation { .. } => ErrorKind::ScopeViolation,
            Self::ScopeUnclosed { .. }
            | Self::UnmatchedDischarge { .. }
            | Self::UndischargedAssumption(_) => ErrorKind::ScopeUnclosed,
            Self::ScopeAlreadyOpen(_) => ErrorKind::ScopeAlreadyOpen,
            Self::ScopeNotFound(_) => ErrorKind::ScopeNotFound,
            Self::DependencyCycle { .. } => ErrorKind::DependencyCycle,
            Self::Invariant(_) => ErrorKind::ValidationInvariantFailed,
            Self::NodeNotFound(_) | Self::DanglingDependency { .. } => ErrorKind::NodeNotFound,
            Self::DuplicateNode(_) | Self::DuplicateChallenge(_) => ErrorKind::InvalidInput,
            Self::ChallengeNotFound(_) => ErrorKind::ChallengeNotFound,
            Self::LockPoisoned(_) => ErrorKind::LockPoisoned,
            Self::Config(_) => ErrorKind::ConfigError,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

pub(crate) fn render_path(path: &[NodeId]) -> String {
    path.iter().map(NodeId::to_string).collect::<Vec<_>>().join(" -> ")
}
