//! Deployment-specific validation rule sets.
//!
//! The engine serves two structurally identical domains that disagree on
//! bounds and defaults; those disagreements live here instead of being
//! duplicated through the service logic.

/// Bounds and defaults injected into the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Maximum name length in characters.
    pub name_max_chars: usize,
    /// Maximum description length in characters.
    pub description_max_chars: usize,
    /// Minimum category length in characters, when a category is supplied.
    pub category_min_chars: usize,
    /// Maximum category length in characters.
    pub category_max_chars: usize,
    /// Status flag assigned at creation.
    pub default_completed: bool,
    /// Reject a `due_at` earlier than the creation/update instant.
    pub reject_past_due: bool,
}

impl ValidationPolicy {
    /// Task-manager rules: generous text bounds, resources start pending,
    /// deadlines must lie in the future.
    pub fn task_manager() -> Self {
        Self {
            name_max_chars: 200,
            description_max_chars: 1000,
            category_min_chars: 1,
            category_max_chars: 50,
            default_completed: false,
            reject_past_due: true,
        }
    }

    /// Product-catalog rules: tighter text bounds, resources start active,
    /// categories need at least two characters.
    pub fn product_catalog() -> Self {
        Self {
            name_max_chars: 100,
            description_max_chars: 500,
            category_min_chars: 2,
            category_max_chars: 50,
            default_completed: true,
            reject_past_due: true,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::task_manager()
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationPolicy;

    #[test]
    fn presets_differ_where_the_domains_do() {
        let tasks = ValidationPolicy::task_manager();
        let catalog = ValidationPolicy::product_catalog();

        assert!(!tasks.default_completed);
        assert!(catalog.default_completed);
        assert!(tasks.name_max_chars > catalog.name_max_chars);
        assert_eq!(catalog.category_min_chars, 2);
    }
}
