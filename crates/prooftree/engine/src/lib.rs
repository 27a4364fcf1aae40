#![deny(unsafe_code)]
//! # prooftree-engine
//!
//! Graph-consistency checks for a shared proof tree.
//!
//! The engine never owns the tree. It borrows nodes, challenges and context
//! names through the capabilities in [`lookup`] and answers questions about
//! them:
//!
//! - [`CycleDetector`] finds dependency cycles from one node or across all.
//! - [`ScopeTracker`] tracks local assumptions and which of them enclose a node.
//! - [`validation`] holds the pure validators: scope references and balance,
//!   context references, size limits, and the validation invariant.
//! - [`ConsistencyEngine`] combines them under an [`EngineConfig`].
//!
//! ```
//! use prooftree_engine::{ConsistencyEngine, ProofState, ScopeTracker};
//! use prooftree_types::{InferenceRule, Node, NodeId, NodeType};
//!
//! let mut state = ProofState::new();
//! let root = Node::new(NodeId::root(), NodeType::Claim, "n^2 is even", InferenceRule::ModusPonens).unwrap();
//! state.insert_node(root).unwrap();
//!
//! let engine = ConsistencyEngine::default();
//! let report = engine.audit(&state, &ScopeTracker::new()).unwrap();
//! assert!(report.is_valid());
//! ```

pub mod config;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod scope;
pub mod state;
pub mod taint;
pub mod validation;

pub use config::EngineConfig;
pub use cycle::{CycleDetector, CycleResult};
pub use engine::{ConsistencyEngine, ValidationReport, Violation};
pub use error::EngineError;
pub use lookup::{ChallengeLookup, ChildLookup, ContextIndex, ContextLookup, NodeLookup};
pub use scope::{ScopeEvent, ScopeTracker};
pub use state::ProofState;
pub use taint::{compute_taint, propagate_taint};
pub use validation::{InvariantFailure, ReferenceKind, ScopeBalance};
