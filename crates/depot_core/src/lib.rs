//! Core engine for Depot resource services.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::resource::{
    name_key, now_epoch_ms, FieldPatch, NewResource, Priority, Resource, ResourceId, ResourcePatch,
};
pub use query::filter::FilterSpec;
pub use query::paginate::{paginate, Page, PageMeta, DEFAULT_PAGE_LIMIT, PAGE_LIMIT_MAX};
pub use query::stats::{PriceSummary, Stats, UPCOMING_LIMIT, UPCOMING_WINDOW_MS};
pub use service::policy::ValidationPolicy;
pub use service::resource_service::{ListQuery, ResourceService, ServiceError};
pub use store::{MemoryResourceStore, ResourceStore, SqliteResourceStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
