use crate::error::EngineError;
use prooftree_types::{Node, NodeType, ScopeEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Every scope reference of `node` must name an active local assumption.
pub fn validate_scope(node: &Node, active: &[ScopeEntry]) -> Result<(), EngineError> {
    if node.scope.is_empty() {
        return Ok(());
    }
    let open: HashSet<String> = active
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.node_id.to_string())
        .collect();
    match node.scope.iter().find(|r| !open.contains(r.as_str())) {
        Some(reference) => Err(EngineError::ScopeViolation {
            node: node.id.clone(),
            reference: reference.clone(),
        }),
        None => Ok(()),
    }
}

/// Assume/discharge counts from an ordered scan of nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeBalance {
    /// Assumptions never matched by a discharge.
    pub outstanding: usize,
    /// Discharges seen while no assumption was open.
    pub unmatched_discharges: usize,
}

impl ScopeBalance {
    pub fn is_balanced(&self) -> bool {
        self.outstanding == 0
    }

    pub fn is_strictly_balanced(&self) -> bool {
        self.outstanding == 0 && self.unmatched_discharges == 0
    }
}

/// Count open assumptions in the order given. The counter never drops below
/// zero; discharges with nothing open are tallied separately.
pub fn scope_balance<'a, I>(nodes: I) -> ScopeBalance
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut balance = ScopeBalance::default();
    for node in nodes {
        match node.node_type {
            NodeType::LocalAssume => balance.outstanding += 1,
            NodeType::LocalDischarge if balance.outstanding > 0 => balance.outstanding -= 1,
            NodeType::LocalDischarge => balance.unmatched_discharges += 1,
            _ => {}
        }
    }
    balance
}

/// Fails with an unclosed-scope error when assumptions remain open. Extra
/// discharges are tolerated and only reported in the returned balance.
pub fn validate_scope_balance<'a, I>(nodes: I) -> Result<ScopeBalance, EngineError>
where
    I: IntoIterator<Item = &'a Node>,
{
    let balance = scope_balance(nodes);
    if balance.outstanding > 0 {
        return Err(EngineError::ScopeUnclosed {
            outstanding: balance.outstanding,
        });
    }
    Ok(balance)
}

/// Like [`validate_scope_balance`], but a discharge without an open
/// assumption is also an error.
pub fn validate_scope_balance_strict<'a, I>(nodes: I) -> Result<ScopeBalance, EngineError>
where
    I: IntoIterator<Item = &'a Node>,
{
    let balance = validate_scope_balance(nodes)?;
    if balance.unmatched_discharges > 0 {
        return Err(EngineError::UnmatchedDischarge {
            count: balance.unmatched_discharges,
        });
    }
    Ok(balance)
}
