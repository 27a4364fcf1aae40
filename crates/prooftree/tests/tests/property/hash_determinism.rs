//! Property tests: the content hash depends on logical content only.
//!
//! Reference order, duplicate references, node identity and state never change
//! the hash; empty and absent reference lists hash the same.

use prooftree_tests::id;
use prooftree_types::{EpistemicState, InferenceRule, Node, NodeId, NodeType};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_statement() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,10}){0,4}"
}

fn arb_refs() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z_]{1,8}", 0..8)
}

fn arb_deps() -> impl Strategy<Value = Vec<NodeId>> {
    prop::collection::vec(1u32..40, 0..6).prop_map(|ns| ns.into_iter().map(|n| id(&format!("1.{}", n))).collect())
}

/// A value together with a shuffled copy of itself.
fn with_shuffle<T: Clone + std::fmt::Debug + 'static>(
    s: impl Strategy<Value = Vec<T>>,
) -> impl Strategy<Value = (Vec<T>, Vec<T>)> {
    s.prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
}

fn build(at: &str, statement: &str, context: &[String], deps: &[NodeId]) -> Node {
    Node::draft(id(at), NodeType::Claim, statement, InferenceRule::ModusPonens)
        .context(context.iter().cloned())
        .dependencies(deps.iter().cloned())
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Permuting context references and dependencies never changes the hash.
    #[test]
    fn reference_order_never_changes_hash(
        statement in arb_statement(),
        (refs, refs_shuffled) in with_shuffle(arb_refs()),
        (deps, deps_shuffled) in with_shuffle(arb_deps()),
    ) {
        let a = build("1.1", &statement, &refs, &deps);
        let b = build("1.1", &statement, &refs_shuffled, &deps_shuffled);
        prop_assert_eq!(a.content_hash, b.content_hash);
    }

    /// Recomputing the hash is stable and agrees with the stored value.
    #[test]
    fn recomputation_is_stable(
        statement in arb_statement(),
        refs in arb_refs(),
        deps in arb_deps(),
    ) {
        let node = build("1.2", &statement, &refs, &deps);
        let first = node.compute_content_hash();
        for _ in 0..3 {
            prop_assert_eq!(node.compute_content_hash(), first);
        }
        prop_assert_eq!(node.content_hash, first);
        prop_assert!(node.verify_content_hash().is_ok());
    }

    /// Identity and state are outside the hash.
    #[test]
    fn identity_and_state_are_excluded(
        statement in arb_statement(),
        refs in arb_refs(),
        child in 1u32..50,
    ) {
        let a = build("1.1", &statement, &refs, &[]);
        let mut b = build(&format!("1.{}.1", child), &statement, &refs, &[]);
        b.set_epistemic(EpistemicState::Admitted).unwrap();
        b.claim("prover-7", chrono::Utc::now()).unwrap();
        prop_assert_eq!(a.content_hash, b.compute_content_hash());
    }

    /// A reference containing a comma never hashes like the references it
    /// would split into.
    #[test]
    fn joined_reference_differs_from_its_parts(
        (left, right) in ("[a-z_]{1,8}", "[a-z_]{1,8}"),
    ) {
        prop_assume!(left != right);
        let joined = build("1.1", "p", &[format!("{},{}", left, right)], &[]);
        let split = build("1.1", "p", &[left, right], &[]);
        prop_assert_ne!(joined.content_hash, split.content_hash);
    }

    /// Distinct statements give distinct hashes.
    #[test]
    fn statement_is_covered(a in arb_statement(), b in arb_statement()) {
        prop_assume!(a != b);
        prop_assert_ne!(build("1", &a, &[], &[]).content_hash, build("1", &b, &[], &[]).content_hash);
    }
}

#[test]
fn empty_and_absent_lists_hash_alike() {
    let absent = Node::new(id("1.4"), NodeType::Case, "case n = 0", InferenceRule::Assumption).unwrap();
    let empty = Node::draft(id("1.4"), NodeType::Case, "case n = 0", InferenceRule::Assumption)
        .context(Vec::<String>::new())
        .dependencies(Vec::new())
        .validation_deps(Vec::new())
        .build()
        .unwrap();
    assert_eq!(absent.content_hash, empty.content_hash);
}

#[test]
fn comma_in_reference_is_content() {
    let joined = build("1.1", "p", &["a,b".to_string()], &[]);
    let split = build("1.1", "p", &["a".to_string(), "b".to_string()], &[]);
    assert_ne!(joined.content_hash, split.content_hash);
}
