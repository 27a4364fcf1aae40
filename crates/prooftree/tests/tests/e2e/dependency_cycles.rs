//! End-to-end test: dependency cycles are found from a single node and by a
//! full sweep, and block validation.

use prooftree_engine::{ConsistencyEngine, CycleDetector, ScopeTracker};
use prooftree_tests::{claim, id, init_tracing, state_of};
use prooftree_types::ErrorKind;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn mutual_dependency_is_one_cycle() {
    init_tracing();
    // 1 -> 1.1 -> 1.2 with 1.1 and 1.2 depending on each other
    let state = state_of([claim("1", &["1.1"]), claim("1.1", &["1.2"]), claim("1.2", &["1.1"])]);
    let detector = CycleDetector::new(&state);

    let result = detector.detect_cycle(&id("1.1"));
    assert!(result.has_cycle);
    assert!(result.path.contains(&id("1.1")));
    assert!(result.path.contains(&id("1.2")));
    assert_eq!(result.path.first(), result.path.last());

    assert_eq!(detector.validate_all().len(), 1);
}

#[test]
fn root_above_cycle_is_not_cyclic() {
    let state = state_of([claim("1", &["1.1"]), claim("1.1", &["1.2"]), claim("1.2", &["1.1"])]);
    let detector = CycleDetector::new(&state);

    let result = detector.detect_cycle(&id("1"));
    assert!(!result.has_cycle);
    assert!(result.path.is_empty());

    // the cycle below is still visible to the reachability search
    let below = detector.find_reachable_cycle(&id("1"));
    assert!(below.has_cycle);
    assert!(!below.path.contains(&id("1")));
}

#[test]
fn depending_on_a_cycle_does_not_block_validation() {
    let mut state = state_of([claim("1.1", &["1.3"]), claim("1.3", &["1.4"]), claim("1.4", &["1.3"])]);
    let engine = ConsistencyEngine::default();
    let scopes = ScopeTracker::new();

    let report = engine.check_node(&state, &scopes, &id("1.1")).unwrap();
    assert!(!report.kinds().contains(&ErrorKind::DependencyCycle));
    engine.validate(&mut state, &scopes, &id("1.1")).unwrap();

    let err = engine.may_validate(&state, &scopes, &id("1.3")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DependencyCycle);
}

#[test]
fn broken_reference_is_not_a_cycle() {
    let state = state_of([claim("1", &["1.4"]), claim("1.1", &["1", "1.7"])]);
    let detector = CycleDetector::new(&state);
    assert!(!detector.detect_cycle(&id("1.1")).has_cycle);
    assert!(detector.validate_all().is_empty());

    // the dangling edge is reported as its own violation
    let report = ConsistencyEngine::default()
        .audit(&state, &ScopeTracker::new())
        .unwrap();
    assert!(!report.kinds().contains(&ErrorKind::DependencyCycle));
    assert_eq!(
        report.kinds().iter().filter(|k| **k == ErrorKind::NodeNotFound).count(),
        2
    );
}

#[test]
fn cycle_blocks_validation_until_broken() {
    let mut state = state_of([claim("1", &[]), claim("1.1", &["1.2"]), claim("1.2", &["1.1"])]);
    let engine = ConsistencyEngine::default();
    let scopes = ScopeTracker::new();

    let err = engine.validate(&mut state, &scopes, &id("1.2")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DependencyCycle);
    assert!(err.to_string().contains("1.2 -> 1.1 -> 1.2"));

    // rewrite 1.2 without the back edge
    let node = state.node_mut(&id("1.2")).unwrap();
    node.dependencies.clear();
    node.refresh_content_hash();

    engine.validate(&mut state, &scopes, &id("1.2")).unwrap();
    engine.validate(&mut state, &scopes, &id("1.1")).unwrap();
}
