//! Conjunctive resource filtering.
//!
//! # Invariants
//! - Predicates combine with AND; an unset predicate imposes no constraint.
//! - An empty specification is the identity over its input.

use crate::model::resource::{Priority, Resource};

/// Optional predicates, matched conjunctively.
///
/// Flag, priority and category use exact equality. The price predicates are
/// inclusive bounds; a resource without a price fails any price predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FilterSpec {
    /// Returns whether no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.completed.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Returns whether one resource passes every set predicate.
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(completed) = self.completed {
            if resource.completed != completed {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if resource.priority != priority {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if resource.category.as_deref() != Some(category) {
                return false;
            }
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let Some(price) = resource.price else {
                return false;
            };
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }
        true
    }
}

/// Keeps the resources matching `spec`, preserving input order.
pub fn apply(resources: Vec<Resource>, spec: &FilterSpec) -> Vec<Resource> {
    if spec.is_empty() {
        return resources;
    }
    resources
        .into_iter()
        .filter(|resource| spec.matches(resource))
        .collect()
}
