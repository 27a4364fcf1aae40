//! Size guards. Limits are inclusive caps supplied by the caller.

use crate::error::EngineError;
use prooftree_types::{Challenge, Node};
use std::borrow::Borrow;

/// Depth cap applied by [`validate_depth_default`].
pub const DEFAULT_MAX_DEPTH: usize = 20;

pub fn validate_depth(node: &Node, max_depth: usize) -> Result<(), EngineError> {
    let depth = node.depth();
    if depth > max_depth {
        return Err(EngineError::DepthExceeded {
            node: node.id.clone(),
            depth,
            max: max_depth,
        });
    }
    Ok(())
}

pub fn validate_depth_default(node: &Node) -> Result<(), EngineError> {
    validate_depth(node, DEFAULT_MAX_DEPTH)
}

pub fn validate_challenge_limit<C: Borrow<Challenge>>(
    challenges: &[C],
    max: usize,
) -> Result<(), EngineError> {
    if challenges.len() > max {
        return Err(EngineError::ChallengeLimitExceeded {
            count: challenges.len(),
            max,
        });
    }
    Ok(())
}

pub fn validate_refinement_count(
    node: &Node,
    current_count: usize,
    max: usize,
) -> Result<(), EngineError> {
    if current_count > max {
        return Err(EngineError::RefinementLimitExceeded {
            node: node.id.clone(),
            count: current_count,
            max,
        });
    }
    Ok(())
}
