//! Storage contracts and backends for resources.
//!
//! # Responsibility
//! - Define the CRUD contract every backend honors.
//! - Keep identity and name-index maintenance inside the storage boundary.
//!
//! # Invariants
//! - Stores report presence/absence; business rules live in the service.
//! - The case-folded name index makes check-and-insert atomic per backend,
//!   so two concurrent creations can never both claim one name.

use crate::db::DbError;
use crate::model::resource::{NewResource, Resource, ResourceId, ResourcePatch};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryResourceStore;
pub use sqlite::SqliteResourceStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer failure.
///
/// `NameTaken` is an index collision report, not a business judgement: the
/// service decides what a duplicate name means to the caller.
#[derive(Debug)]
pub enum StoreError {
    /// The case-folded name index already maps this key to another resource.
    NameTaken(String),
    /// A persisted row no longer parses into a valid resource.
    InvalidData(String),
    /// Transport failure from a durable backend.
    Backend(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTaken(name) => write!(f, "resource name already in use: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted resource data: {message}"),
            Self::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::NameTaken(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Backend(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(DbError::Sqlite(value))
    }
}

/// CRUD contract shared by every storage backend.
///
/// Identifiers and timestamps are store-owned: `create` generates a fresh id
/// and stamps `created_at = updated_at = now`, `update` re-stamps
/// `updated_at`. Absence is a valid outcome (`None` / `false`), never an
/// error.
pub trait ResourceStore {
    /// Returns every stored resource; ordering is unspecified at rest.
    fn get_all(&self) -> StoreResult<Vec<Resource>>;

    /// Returns one resource by id, or `None` when the id is unknown.
    fn get(&self, id: ResourceId) -> StoreResult<Option<Resource>>;

    /// Case-insensitive name lookup through the name index.
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Resource>>;

    /// Persists a new resource and returns the stored copy.
    ///
    /// `completed` is the policy-resolved status flag; the store does not
    /// know which default a deployment wants.
    fn create(&self, draft: NewResource, completed: bool) -> StoreResult<Resource>;

    /// Merges a patch onto an existing resource.
    ///
    /// Returns `Ok(None)` when the id is unknown; only supplied patch slots
    /// overwrite stored values.
    fn update(&self, id: ResourceId, patch: ResourcePatch) -> StoreResult<Option<Resource>>;

    /// Removes one resource. Idempotent; `false` when nothing was there.
    fn delete(&self, id: ResourceId) -> StoreResult<bool>;

    /// Number of stored resources.
    fn count(&self) -> StoreResult<usize>;
}
