//! Business-rule orchestration over storage backends.
//!
//! # Responsibility
//! - Validate inputs against an injected rule set before any store mutation.
//! - Shape list/stats output for external callers.
//!
//! # Invariants
//! - Service APIs never bypass the store contract.
//! - Business failures are typed; the store only reports presence/absence.

pub mod policy;
pub mod resource_service;
