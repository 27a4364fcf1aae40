use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-checkable error taxonomy shared by every proof-tree component.
///
/// The string form returned by [`ErrorKind::code`] is stable and is what
/// callers match on; the Rust variant names are not part of the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    DefNotFound,
    AssumptionNotFound,
    ExternalNotFound,
    DepthExceeded,
    ChallengeLimitExceeded,
    RefinementLimitExceeded,
    ScopeViolation,
    ScopeUnclosed,
    DependencyCycle,
    ValidationInvariantFailed,
    AmbiguousRef,
    InvalidId,
    InvalidInput,
    InvalidTransition,
    NodeNotFound,
    ChallengeNotFound,
    ScopeNotFound,
    ScopeAlreadyOpen,
    ScopeAlreadyDischarged,
    ContentHashMismatch,
    LockPoisoned,
    ConfigError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DefNotFound => "DEF_NOT_FOUND",
            Self::AssumptionNotFound => "ASSUMPTION_NOT_FOUND",
            Self::ExternalNotFound => "EXTERNAL_NOT_FOUND",
            Self::DepthExceeded => "DEPTH_EXCEEDED",
            Self::ChallengeLimitExceeded => "CHALLENGE_LIMIT_EXCEEDED",
            Self::RefinementLimitExceeded => "REFINEMENT_LIMIT_EXCEEDED",
            Self::ScopeViolation => "SCOPE_VIOLATION",
            Self::ScopeUnclosed => "SCOPE_UNCLOSED",
            Self::DependencyCycle => "DEPENDENCY_CYCLE",
            Self::ValidationInvariantFailed => "VALIDATION_INVARIANT_FAILED",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::NodeNotFound => "NODE_NOT_FOUND",
            Self::ChallengeNotFound => "CHALLENGE_NOT_FOUND",
            Self::ScopeNotFound => "SCOPE_NOT_FOUND",
            Self::ScopeAlreadyOpen => "SCOPE_ALREADY_OPEN",
            Self::ScopeAlreadyDischarged => "SCOPE_ALREADY_DISCHARGED",
            Self::ContentHashMismatch => "CONTENT_HASH_MISMATCH",
            Self::LockPoisoned => "LOCK_POISONED",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Caller-facing exit-code class for this kind.
    pub fn exit_class(&self) -> ExitClass {
        match self {
            Self::InvalidId | Self::InvalidInput | Self::InvalidTransition => ExitClass::Usage,
            Self::ContentHashMismatch | Self::LockPoisoned => ExitClass::Corruption,
            Self::ConfigError => ExitClass::Io,
            _ => ExitClass::Logic,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_class().code()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Exit-code classes. Every graph-consistency failure is a `Logic` error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitClass {
    Usage,
    Logic,
    Corruption,
    Io,
}

impl ExitClass {
    pub fn code(&self) -> i32 {
        match self {
            Self::Usage => 2,
            Self::Logic => 3,
            Self::Corruption => 4,
            Self::Io => 5,
        }
    }
}

/// Errors raised while constructing or mutating proof-tree values.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error("invalid node id {input:?}: {reason}")]
    InvalidId { input: String, reason: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid {what} transition: {from} -> {to}")]
    InvalidTransition {
        what: &'static str,
        from: String,
        to: String,
    },
    #[error("content hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch { expected: String, computed: String },
    #[error("scope entry {0} already discharged")]
    AlreadyDischarged(String),
}

impl TypesError {
    pub(crate) fn invalid_id(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidId { .. } => ErrorKind::InvalidId,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::HashMismatch { .. } => ErrorKind::ContentHashMismatch,
            Self::AlreadyDischarged(_) => ErrorKind::ScopeAlreadyDischarged,
        }
    }
}
