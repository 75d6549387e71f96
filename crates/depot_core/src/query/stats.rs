//! Collection statistics and the upcoming-deadline projection.
//!
//! # Invariants
//! - `completed + pending == total` for every snapshot.
//! - Per-priority buckets are zero-initialized over the whole enum domain.
//! - Category-less resources never appear in `by_category`.
//! - An empty snapshot yields zeros and empties, never a division by zero.

use crate::model::resource::{Priority, Resource};
use serde::Serialize;
use std::collections::BTreeMap;

/// Forward window for the upcoming-deadline projection.
pub const UPCOMING_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;
/// Maximum entries in the upcoming-deadline projection.
pub const UPCOMING_LIMIT: usize = 5;

/// Price extrema over the resources that carry a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Aggregate snapshot statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    /// Resources with the status flag set (completed / active).
    pub completed: usize,
    /// Resources with the status flag cleared (pending / inactive).
    pub pending: usize,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Absent when no resource carries a price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceSummary>,
    /// Pending resources due within the next seven days, nearest first,
    /// truncated to [`UPCOMING_LIMIT`] entries.
    pub upcoming: Vec<Resource>,
}

/// Computes statistics over one full snapshot.
///
/// `now_ms` anchors the upcoming window; passing it in keeps this function
/// pure and lets tests pin the clock.
pub fn collect(resources: &[Resource], now_ms: i64) -> Stats {
    let mut by_priority: BTreeMap<Priority, usize> =
        Priority::ALL.iter().map(|priority| (*priority, 0)).collect();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    let mut completed = 0usize;
    let mut prices: Vec<f64> = Vec::new();

    for resource in resources {
        if resource.completed {
            completed += 1;
        }
        if let Some(bucket) = by_priority.get_mut(&resource.priority) {
            *bucket += 1;
        }
        if let Some(category) = &resource.category {
            *by_category.entry(category.clone()).or_insert(0) += 1;
        }
        if let Some(price) = resource.price {
            prices.push(price);
        }
    }

    let price = summarize_prices(&prices);

    let horizon = now_ms.saturating_add(UPCOMING_WINDOW_MS);
    let mut upcoming: Vec<Resource> = resources
        .iter()
        .filter(|resource| {
            !resource.completed
                && resource
                    .due_at
                    .is_some_and(|due| due >= now_ms && due <= horizon)
        })
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));
    upcoming.truncate(UPCOMING_LIMIT);

    Stats {
        total: resources.len(),
        completed,
        pending: resources.len() - completed,
        by_priority,
        by_category,
        price,
        upcoming,
    }
}

fn summarize_prices(prices: &[f64]) -> Option<PriceSummary> {
    let first = *prices.first()?;
    let mut min = first;
    let mut max = first;
    let mut sum = 0.0;
    for price in prices {
        min = min.min(*price);
        max = max.max(*price);
        sum += price;
    }
    Some(PriceSummary {
        min,
        max,
        avg: sum / prices.len() as f64,
    })
}
