//! Pure validators. Each takes borrowed state and returns a typed failure;
//! none of them mutate what they inspect.

pub mod context;
pub mod invariant;
pub mod limits;
pub mod scope;

pub use context::{validate_context_refs, ReferenceKind};
pub use invariant::{check_validation_invariants, validation_blockers, InvariantFailure};
pub use limits::{
    validate_challenge_limit, validate_depth, validate_depth_default, validate_refinement_count,
    DEFAULT_MAX_DEPTH,
};
pub use scope::{
    scope_balance, validate_scope, validate_scope_balance, validate_scope_balance_strict,
    ScopeBalance,
};
