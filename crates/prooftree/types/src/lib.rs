#![deny(unsafe_code)]
//! # prooftree-types
//!
//! Value types for a shared, hierarchically addressed proof tree that several
//! agents build and verify together.
//!
//! - [`NodeId`]: dotted hierarchical address (`1.2.3`)
//! - [`Node`]: a proof step with its reference edges and state axes
//! - [`ContentHash`]: BLAKE3 digest over a node's logical content
//! - [`Challenge`]: a verifier's dispute against one aspect of a node
//! - [`ScopeEntry`]: a tracked local assumption
//! - [`ErrorKind`]: the error taxonomy shared with the engine crate

pub mod challenge;
pub mod error;
pub mod hash;
pub mod id;
pub mod node;
pub mod scope;
pub mod state;

pub use challenge::{Challenge, ChallengeStatus, ChallengeTarget};
pub use error::{ErrorKind, ExitClass, TypesError};
pub use hash::{ContentHash, ContentHashError, ContentHasher};
pub use id::NodeId;
pub use node::{Node, NodeDraft};
pub use scope::ScopeEntry;
pub use state::{EpistemicState, InferenceRule, NodeType, TaintState, WorkflowState};
