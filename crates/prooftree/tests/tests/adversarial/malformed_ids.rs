//! Adversarial test: malformed ids and states are rejected at the boundary
//! with a usage-class error and never panic.

use prooftree_types::{ErrorKind, ExitClass, Node, NodeId, ScopeEntry};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn malformed_ids_are_rejected() {
    for input in [
        " ", "1.", ".1", "1..2", "0", "1.0", "2", "1.-3", "1.+3", "1.01", "1.a", "1 .2", "1.99999999999",
    ] {
        let err = NodeId::parse(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidId, "{:?}", input);
        assert_eq!(err.kind().exit_class(), ExitClass::Usage);
    }
}

#[test]
fn empty_means_zero_only_when_persisted() {
    assert!(NodeId::parse("").is_err());
    assert!(NodeId::parse_persisted("").unwrap().is_zero());
    assert!(NodeId::parse_persisted("   ").is_err());
}

#[test]
fn zero_id_is_inert() {
    let zero = NodeId::zero();
    assert_eq!(zero.depth(), 0);
    assert!(!zero.is_root());
    assert!(!zero.is_ancestor_of(&zero));
    assert!(!zero.is_ancestor_of(&NodeId::root()));
    assert!(zero.parent().is_none());
}

#[test]
fn unknown_wire_tags_are_rejected() {
    let node = Node::new(NodeId::root(), prooftree_types::NodeType::Claim, "x", prooftree_types::InferenceRule::Assumption).unwrap();
    let mut json = serde_json::to_value(&node).unwrap();
    json["workflow_state"] = serde_json::Value::String("hijacked".into());
    assert!(serde_json::from_value::<Node>(json).is_err());

    let mut json = serde_json::to_value(&node).unwrap();
    json["id"] = serde_json::Value::String("1..1".into());
    assert!(serde_json::from_value::<Node>(json).is_err());
}

#[test]
fn discharge_cannot_be_replayed() {
    let now = chrono::Utc::now();
    let mut entry = ScopeEntry::new(NodeId::root(), "assume p", now).unwrap();
    entry.discharge(now).unwrap();
    let first = entry.discharged_at;
    assert_eq!(entry.discharge(now).unwrap_err().kind(), ErrorKind::ScopeAlreadyDischarged);
    assert_eq!(entry.discharged_at, first);
}
