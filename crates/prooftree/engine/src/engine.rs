//! The consistency engine: composes the individual validators into per-node
//! checks, the validation gate, and a whole-proof audit.

use crate::config::EngineConfig;
use crate::cycle::CycleDetector;
use crate::error::EngineError;
use crate::lookup::NodeLookup;
use crate::scope::ScopeTracker;
use crate::state::ProofState;
use crate::taint::propagate_taint;
use crate::validation::{
    check_validation_invariants, validate_challenge_limit, validate_context_refs, validate_depth,
    validate_refinement_count, validate_scope, validate_scope_balance,
    validate_scope_balance_strict, validation_blockers,
};
use prooftree_types::{EpistemicState, ErrorKind, Node, NodeId, ScopeEntry, TypesError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One failed check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    pub message: String,
}

impl Violation {
    pub fn from_error(node: Option<&NodeId>, err: &EngineError) -> Self {
        Self {
            kind: err.kind(),
            node: node.cloned(),
            message: err.to_string(),
        }
    }
}

/// Outcome of a batch of checks. Every failure is kept; nothing stops at the
/// first violation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks_performed: usize,
    pub checks_passed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.violations.iter().map(|v| v.kind).collect()
    }

    pub fn violations_for<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.node.as_ref() == Some(node))
    }

    fn record(&mut self, node: Option<&NodeId>, result: Result<(), EngineError>) {
        self.checks_performed += 1;
        match result {
            Ok(()) => self.checks_passed += 1,
            Err(e) => {
                debug!(node = ?node.map(|n| n.to_string()), kind = %e.kind(), "check failed");
                self.violations.push(Violation::from_error(node, &e));
            }
        }
    }
}

/// Applies the configured limits and the consistency rules to a proof state.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyEngine {
    config: EngineConfig,
}

impl ConsistencyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every per-node check against `id`, including a cycle search from it.
    #[instrument(skip(self, state, scopes), fields(node = %id))]
    pub fn check_node(
        &self,
        state: &ProofState,
        scopes: &ScopeTracker,
        id: &NodeId,
    ) -> Result<ValidationReport, EngineError> {
        let node = state.node(id)?;
        let active = scopes.active_entries()?;

        let mut report = ValidationReport::default();
        self.node_checks(state, &active, node, &mut report);
        report.record(Some(id), CycleDetector::new(state).detect_cycle(id).into_result());
        Ok(report)
    }

    /// Decide whether `id` may move to `validated`, without changing anything.
    ///
    /// The node must be able to make the transition, every direct child must
    /// be accepted, no open challenge may target it or a direct child, a
    /// local assumption it introduces must be discharged, and no dependency
    /// path may lead from it back to itself.
    #[instrument(skip(self, state, scopes), fields(node = %id))]
    pub fn may_validate(
        &self,
        state: &ProofState,
        scopes: &ScopeTracker,
        id: &NodeId,
    ) -> Result<(), EngineError> {
        let node = state.node(id)?;
        let current = node.epistemic_state;
        if current != EpistemicState::Validated
            && !current.can_transition_to(EpistemicState::Validated)
        {
            return Err(TypesError::InvalidTransition {
                what: "epistemic",
                from: current.to_string(),
                to: EpistemicState::Validated.to_string(),
            }
            .into());
        }

        if let Some(failure) = validation_blockers(node, Some(state), Some(state)) {
            return Err(EngineError::Invariant(failure));
        }

        if node.node_type.opens_scope() {
            match scopes.entry(id)? {
                Some(entry) if entry.is_active() => {
                    return Err(EngineError::UndischargedAssumption(id.clone()))
                }
                Some(_) => {}
                None => return Err(EngineError::ScopeNotFound(id.clone())),
            }
        }

        CycleDetector::new(state).detect_cycle(id).into_result()
    }

    /// Validate `id` if [`Self::may_validate`] allows it, then recompute taint
    /// below it. Returns the ids whose taint changed.
    #[instrument(skip(self, state, scopes), fields(node = %id))]
    pub fn validate(
        &self,
        state: &mut ProofState,
        scopes: &ScopeTracker,
        id: &NodeId,
    ) -> Result<Vec<NodeId>, EngineError> {
        self.may_validate(state, scopes, id)?;
        state.node_mut(id)?.set_epistemic(EpistemicState::Validated)?;
        let changed = propagate_taint(state, id)?;
        info!(tainted = changed.len(), "node validated");
        Ok(changed)
    }

    /// Refinement guard using the configured limit.
    pub fn check_refinement(
        &self,
        state: &ProofState,
        id: &NodeId,
        current_count: usize,
    ) -> Result<(), EngineError> {
        validate_refinement_count(state.node(id)?, current_count, self.config.max_refinements)
    }

    /// Full sweep: all dependency cycles, scope balance in id order, and the
    /// per-node checks for every node.
    #[instrument(skip_all, fields(nodes = state.node_count()))]
    pub fn audit(
        &self,
        state: &ProofState,
        scopes: &ScopeTracker,
    ) -> Result<ValidationReport, EngineError> {
        let active = scopes.active_entries()?;
        let mut report = ValidationReport::default();

        let cycles = CycleDetector::new(state).validate_all();
        if cycles.is_empty() {
            report.record(None, Ok(()));
        }
        for cycle in cycles {
            let start = cycle.path.first().cloned();
            report.record(start.as_ref(), cycle.into_result());
        }

        let balance = if self.config.strict_scope_balance {
            validate_scope_balance_strict(state.nodes())
        } else {
            validate_scope_balance(state.nodes())
        };
        match &balance {
            Ok(b) if b.unmatched_discharges > 0 => {
                warn!(unmatched = b.unmatched_discharges, "discharges without an open assumption")
            }
            _ => {}
        }
        report.record(None, balance.map(|_| ()));

        for node in state.all_nodes() {
            self.node_checks(state, &active, node, &mut report);
        }

        if report.is_valid() {
            info!(checks = report.checks_performed, "audit passed");
        } else {
            warn!(
                checks = report.checks_performed,
                violations = report.violations.len(),
                "audit found violations"
            );
        }
        Ok(report)
    }

    fn node_checks(
        &self,
        state: &ProofState,
        active: &[ScopeEntry],
        node: &Node,
        report: &mut ValidationReport,
    ) {
        let id = Some(&node.id);
        report.record(id, node.verify_content_hash().map_err(EngineError::from));
        report.record(id, validate_depth(node, self.config.max_depth));
        report.record(id, validate_scope(node, active));
        report.record(id, validate_context_refs(node, state));
        for dep in node.dependencies.iter().chain(node.validation_deps.iter()) {
            let present = match state.get_node(dep) {
                Some(_) => Ok(()),
                None => Err(EngineError::DanglingDependency {
                    node: node.id.clone(),
                    missing: dep.clone(),
                }),
            };
            report.record(id, present);
        }
        report.record(
            id,
            validate_challenge_limit(
                &state.open_challenges_for(&node.id),
                self.config.max_challenges_per_node,
            ),
        );
        report.record(
            id,
            check_validation_invariants(node, Some(state), Some(state)),
        );
    }
}
