//! Resource use-case service.
//!
//! # Responsibility
//! - Enforce business rules (name uniqueness, bounds, deadline sanity)
//!   before delegating to the store.
//! - Orchestrate filter, sort, pagination and statistics for callers.
//!
//! # Invariants
//! - The duplicate-name check always excludes the resource's own id on
//!   update; renaming a resource to its current name succeeds.
//! - List output is sorted newest-first by `created_at`; this ordering is a
//!   fixed service policy, not a caller option.

use crate::model::resource::{
    now_epoch_ms, NewResource, Resource, ResourceId, ResourcePatch,
};
use crate::query::filter::{self, FilterSpec};
use crate::query::paginate::{paginate, Page, DEFAULT_PAGE_LIMIT, PAGE_LIMIT_MAX};
use crate::query::stats::{self, Stats};
use crate::service::policy::ValidationPolicy;
use crate::store::{ResourceStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error surfaced to external callers.
///
/// `Conflict` is deliberately distinct from `Validation` so callers can map
/// duplicate names to their own conflict status.
#[derive(Debug)]
pub enum ServiceError {
    /// Rule-violating input, with the offending field path.
    Validation { field: &'static str, message: String },
    /// Another resource already holds the (case-folded) name.
    Conflict { message: String },
    /// The targeted id does not exist.
    NotFound(ResourceId),
    /// Storage transport failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => write!(f, "invalid {field}: {message}"),
            Self::Conflict { message } => write!(f, "{message}"),
            Self::NotFound(id) => write!(f, "resource not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NameTaken(name) => Self::Conflict {
                message: duplicate_name_message(&name),
            },
            other => Self::Store(other),
        }
    }
}

fn duplicate_name_message(name: &str) -> String {
    format!("a resource named `{name}` already exists")
}

/// List request: optional predicates plus a 1-based page selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: FilterSpec,
    /// Defaults to page 1.
    pub page: Option<u32>,
    /// Defaults to [`DEFAULT_PAGE_LIMIT`], capped at [`PAGE_LIMIT_MAX`].
    pub limit: Option<u32>,
}

/// Use-case facade over a storage backend and a validation policy.
pub struct ResourceService<S: ResourceStore> {
    store: S,
    policy: ValidationPolicy,
}

impl<S: ResourceStore> ResourceService<S> {
    /// Creates a service with the default (task-manager) policy.
    pub fn new(store: S) -> Self {
        Self::with_policy(store, ValidationPolicy::default())
    }

    /// Creates a service with an explicit rule set.
    pub fn with_policy(store: S, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists resources matching the query, newest first, paginated.
    pub fn list(&self, query: &ListQuery) -> Result<Page<Resource>, ServiceError> {
        let page = query.page.unwrap_or(1);
        if page == 0 {
            return Err(ServiceError::Validation {
                field: "page",
                message: "page must be greater than zero".to_string(),
            });
        }
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit == 0 || limit > PAGE_LIMIT_MAX {
            return Err(ServiceError::Validation {
                field: "limit",
                message: format!("limit must be between 1 and {PAGE_LIMIT_MAX}"),
            });
        }
        if let Some(min) = query.filter.min_price {
            if min < 0.0 {
                return Err(ServiceError::Validation {
                    field: "min_price",
                    message: "minimum price must not be negative".to_string(),
                });
            }
        }
        if let (Some(min), Some(max)) = (query.filter.min_price, query.filter.max_price) {
            if max < min {
                return Err(ServiceError::Validation {
                    field: "max_price",
                    message: "maximum price must not be below minimum price".to_string(),
                });
            }
        }

        let mut rows = filter::apply(self.store.get_all()?, &query.filter);
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(paginate(rows, page, limit))
    }

    /// Returns one resource, or `None` when the id is unknown.
    pub fn get(&self, id: ResourceId) -> Result<Option<Resource>, ServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Validates and persists a new resource.
    pub fn create(&self, mut input: NewResource) -> Result<Resource, ServiceError> {
        input.name = input.name.trim().to_string();
        self.check_name(&input.name)?;
        self.check_description(input.description.as_deref())?;
        self.check_category(input.category.as_deref())?;
        self.check_price(input.price)?;
        self.check_due(input.due_at)?;

        if let Some(existing) = self.store.find_by_name(&input.name)? {
            return Err(ServiceError::Conflict {
                message: duplicate_name_message(&existing.name),
            });
        }

        let created = self.store.create(input, self.policy.default_completed)?;
        info!(
            "event=resource_created module=service status=ok id={}",
            created.id
        );
        Ok(created)
    }

    /// Validates and applies a partial update.
    ///
    /// Only the fields present in the patch are validated and merged;
    /// a missing id is a `NotFound`, never a validation failure.
    pub fn update(
        &self,
        id: ResourceId,
        mut patch: ResourcePatch,
    ) -> Result<Resource, ServiceError> {
        let existing = self.store.get(id)?.ok_or(ServiceError::NotFound(id))?;

        if let Some(name) = patch.name.take() {
            let name = name.trim().to_string();
            self.check_name(&name)?;
            if let Some(holder) = self.store.find_by_name(&name)? {
                if holder.id != existing.id {
                    return Err(ServiceError::Conflict {
                        message: duplicate_name_message(&holder.name),
                    });
                }
            }
            patch.name = Some(name);
        }
        self.check_description(patch.description.set_value().map(String::as_str))?;
        self.check_category(patch.category.set_value().map(String::as_str))?;
        self.check_price(patch.price.set_value().copied())?;
        self.check_due(patch.due_at.set_value().copied())?;

        let updated = self
            .store
            .update(id, patch)?
            .ok_or(ServiceError::NotFound(id))?;
        Ok(updated)
    }

    /// Removes one resource; `false` means there was nothing to remove.
    pub fn delete(&self, id: ResourceId) -> Result<bool, ServiceError> {
        let removed = self.store.delete(id)?;
        if removed {
            info!("event=resource_deleted module=service status=ok id={id}");
        }
        Ok(removed)
    }

    /// Flips the status flag through the regular update path.
    pub fn set_completed(&self, id: ResourceId, value: bool) -> Result<Resource, ServiceError> {
        self.update(id, ResourcePatch::status_flag(value))
    }

    /// Aggregate statistics over the full collection.
    pub fn stats(&self) -> Result<Stats, ServiceError> {
        let snapshot = self.store.get_all()?;
        Ok(stats::collect(&snapshot, now_epoch_ms()))
    }

    fn check_name(&self, name: &str) -> Result<(), ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::Validation {
                field: "name",
                message: "name must not be empty".to_string(),
            });
        }
        if name.chars().count() > self.policy.name_max_chars {
            return Err(ServiceError::Validation {
                field: "name",
                message: format!(
                    "name must be at most {} characters",
                    self.policy.name_max_chars
                ),
            });
        }
        Ok(())
    }

    fn check_description(&self, description: Option<&str>) -> Result<(), ServiceError> {
        if let Some(description) = description {
            if description.chars().count() > self.policy.description_max_chars {
                return Err(ServiceError::Validation {
                    field: "description",
                    message: format!(
                        "description must be at most {} characters",
                        self.policy.description_max_chars
                    ),
                });
            }
        }
        Ok(())
    }

    fn check_category(&self, category: Option<&str>) -> Result<(), ServiceError> {
        if let Some(category) = category {
            let chars = category.chars().count();
            if chars < self.policy.category_min_chars {
                return Err(ServiceError::Validation {
                    field: "category",
                    message: format!(
                        "category must be at least {} characters",
                        self.policy.category_min_chars
                    ),
                });
            }
            if chars > self.policy.category_max_chars {
                return Err(ServiceError::Validation {
                    field: "category",
                    message: format!(
                        "category must be at most {} characters",
                        self.policy.category_max_chars
                    ),
                });
            }
        }
        Ok(())
    }

    fn check_price(&self, price: Option<f64>) -> Result<(), ServiceError> {
        if let Some(price) = price {
            if !price.is_finite() || price <= 0.0 {
                return Err(ServiceError::Validation {
                    field: "price",
                    message: "price must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_due(&self, due_at: Option<i64>) -> Result<(), ServiceError> {
        if !self.policy.reject_past_due {
            return Ok(());
        }
        if let Some(due) = due_at {
            if due < now_epoch_ms() {
                return Err(ServiceError::Validation {
                    field: "due_at",
                    message: "due date must not be in the past".to_string(),
                });
            }
        }
        Ok(())
    }
}
