//! Property tests: scope balance agrees with a floor-at-zero counter.

use prooftree_engine::validation::{scope_balance, validate_scope_balance, validate_scope_balance_strict};
use prooftree_tests::node_in;
use prooftree_types::{EpistemicState, ErrorKind, Node, NodeType};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_node_type() -> impl Strategy<Value = NodeType> {
    prop_oneof![
        Just(NodeType::LocalAssume),
        Just(NodeType::LocalDischarge),
        Just(NodeType::Claim),
        Just(NodeType::Case),
        Just(NodeType::Qed),
    ]
}

fn nodes_of(types: &[NodeType]) -> Vec<Node> {
    types
        .iter()
        .enumerate()
        .map(|(i, t)| node_in(&format!("1.{}", i + 1), *t, EpistemicState::Pending))
        .collect()
}

/// (open at the end, discharges with nothing open)
fn oracle(types: &[NodeType]) -> (usize, usize) {
    let mut open = 0usize;
    let mut unmatched = 0usize;
    for t in types {
        match t {
            NodeType::LocalAssume => open += 1,
            NodeType::LocalDischarge if open > 0 => open -= 1,
            NodeType::LocalDischarge => unmatched += 1,
            _ => {}
        }
    }
    (open, unmatched)
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn balance_matches_counter(types in prop::collection::vec(arb_node_type(), 0..30)) {
        let nodes = nodes_of(&types);
        let (open, unmatched) = oracle(&types);

        let balance = scope_balance(&nodes);
        prop_assert_eq!(balance.outstanding, open);
        prop_assert_eq!(balance.unmatched_discharges, unmatched);

        match validate_scope_balance(&nodes) {
            Ok(_) => prop_assert_eq!(open, 0),
            Err(e) => {
                prop_assert!(open > 0);
                prop_assert_eq!(e.kind(), ErrorKind::ScopeUnclosed);
                prop_assert!(e.to_string().contains(&open.to_string()));
            }
        }
        prop_assert_eq!(
            validate_scope_balance_strict(&nodes).is_ok(),
            open == 0 && unmatched == 0
        );
    }

    /// Wrapping any sequence in matched assume/discharge pairs keeps its verdict.
    #[test]
    fn matched_pairs_are_neutral(types in prop::collection::vec(arb_node_type(), 0..20), pairs in 0usize..5) {
        let mut wrapped = vec![NodeType::LocalAssume; pairs];
        wrapped.extend(types.iter().copied());
        wrapped.extend(std::iter::repeat(NodeType::LocalDischarge).take(pairs));
        let inner = validate_scope_balance(&nodes_of(&types)).is_ok();
        let outer = scope_balance(&nodes_of(&wrapped));
        if inner {
            prop_assert!(outer.is_balanced());
        }
    }
}
