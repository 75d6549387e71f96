//! Resource domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by task-style and catalog-style
//!   deployments.
//! - Provide the explicit-presence patch type used by partial updates.
//!
//! # Invariants
//! - `id` is stable and never reused for another resource.
//! - `created_at <= updated_at`; `updated_at` moves on every mutation.
//! - Optional fields round-trip as absent through serialization.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every stored resource.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ResourceId = Uuid;

/// Categorical rank attribute used for filtering and group-by statistics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Everyday default.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Every priority value, in ascending rank order.
    ///
    /// Statistics zero-initialize their per-priority buckets from this set so
    /// unused values still appear in the output.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
}

/// Canonical stored record.
///
/// One shape serves both domains this engine was built for: task-manager
/// deployments read `completed` literally and use `due_at`, catalog
/// deployments read `completed` as "active" and carry `price`. Fields a
/// domain does not use simply stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Stable global ID, generated by the store at creation.
    pub id: ResourceId,
    /// Display name; unique case-insensitively across the whole store.
    pub name: String,
    /// Free-form detail text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Status flag: completed (task domains) or active (catalog domains).
    pub completed: bool,
    /// Categorical rank attribute.
    pub priority: Priority,
    /// Free-form grouping key used by filters and statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Numeric rank attribute; strictly positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Epoch milliseconds; set once at creation, never mutated.
    pub created_at: i64,
    /// Epoch milliseconds; reset on every successful mutation.
    pub updated_at: i64,
    /// Forward-looking deadline in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<i64>,
}

/// Creation input: everything the caller may choose, nothing the store owns.
///
/// The status flag is intentionally absent; its creation default is a policy
/// decision made by the service layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewResource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to [`Priority::Medium`] when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<i64>,
}

/// Three-state patch slot for an optional field.
///
/// `Option<T>` alone cannot distinguish "leave the field alone" from "clear
/// it", so partial updates spell both out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the current value untouched.
    Keep,
    /// Reset the field to absent.
    Clear,
    /// Replace the current value.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldPatch<T> {
    /// Returns the replacement value when this slot is `Set`.
    pub fn set_value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// Returns whether applying this slot would change nothing.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Writes this slot into an optional field.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

/// Partial update input: only populated slots are merged onto the stored
/// record, everything else keeps its prior value.
///
/// Required fields use `Option` (there is nothing to clear), optional fields
/// use [`FieldPatch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePatch {
    pub name: Option<String>,
    pub description: FieldPatch<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: FieldPatch<String>,
    pub price: FieldPatch<f64>,
    pub due_at: FieldPatch<i64>,
}

impl ResourcePatch {
    /// Returns whether the patch carries no change at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_keep()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.category.is_keep()
            && self.price.is_keep()
            && self.due_at.is_keep()
    }

    /// Builds a patch that only flips the status flag.
    pub fn status_flag(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }
}

impl Resource {
    /// Materializes a stored record from creation input.
    ///
    /// The store supplies `id` and `now_ms`; the service supplies the
    /// policy-resolved status flag.
    pub fn from_draft(id: ResourceId, draft: NewResource, completed: bool, now_ms: i64) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            completed,
            priority: draft.priority.unwrap_or_default(),
            category: draft.category,
            price: draft.price,
            created_at: now_ms,
            updated_at: now_ms,
            due_at: draft.due_at,
        }
    }

    /// Merges a patch onto this record and bumps `updated_at`.
    ///
    /// `created_at` and `id` are never touched.
    pub fn apply_patch(&mut self, patch: ResourcePatch, now_ms: i64) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        patch.description.apply(&mut self.description);
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        patch.category.apply(&mut self.category);
        patch.price.apply(&mut self.price);
        patch.due_at.apply(&mut self.due_at);
        self.updated_at = now_ms;
    }
}

/// Case-insensitive identity key for resource names.
///
/// Both stores index names under this key, so the uniqueness constraint sees
/// `"Report"` and `"report"` as the same name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
