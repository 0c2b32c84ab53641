//! Requirement engine: preconditions that gate state-changing actions.
//!
//! # Responsibility
//! - Encode one business rule per predicate, returning a `RequirementCheck`.
//! - Compose checks in caller-controlled priority order.
//! - Map check results onto a presentation-neutral binding contract.
//!
//! # Invariants
//! - Predicates are pure: no I/O, no logging, no shared state.
//! - A failing predicate never errors; it returns a populated `Requirement`.
//! - `RequirementCheck::requirement` is present iff the check failed.

pub mod binding;
pub mod checks;
pub mod compose;
pub mod permission;
pub mod requirement;
