//! Domain model shared by every storage backend.
//!
//! # Responsibility
//! - Define the canonical resource record and its input shapes.
//! - Keep patch/merge semantics in one place for all backends.
//!
//! # Invariants
//! - Every resource is identified by a stable `ResourceId`.
//! - Unset optional fields stay absent; no empty-string placeholders.

pub mod resource;
