//! Pure query functions over store snapshots.
//!
//! # Responsibility
//! - Derive filtered views, pages and statistics without touching storage.
//!
//! # Invariants
//! - Every function here is a pure transformation of its input snapshot;
//!   consistency requires only that the snapshot came from one `get_all`.

pub mod filter;
pub mod paginate;
pub mod stats;
