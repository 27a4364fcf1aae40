#[path = "property/hash_determinism.rs"]
mod hash_determinism;

#[path = "property/cycle_soundness.rs"]
mod cycle_soundness;

#[path = "property/scope_balance.rs"]
mod scope_balance;

#[path = "property/limits.rs"]
mod limits;

#[path = "property/invariant_monotonicity.rs"]
mod invariant_monotonicity;
