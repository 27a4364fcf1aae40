#[path = "e2e/dependency_cycles.rs"]
mod dependency_cycles;

#[path = "e2e/challenge_lifecycle.rs"]
mod challenge_lifecycle;

#[path = "e2e/scope_lifecycle.rs"]
mod scope_lifecycle;

#[path = "e2e/proof_audit.rs"]
mod proof_audit;
