//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `depot_core` linkage.
//! - Drive one create/list/stats round against an in-memory store so the
//!   whole stack can be sanity-checked without a host application.

use depot_core::{
    FilterSpec, ListQuery, MemoryResourceStore, NewResource, Priority, ResourceService,
};

fn main() {
    println!("depot_core version={}", depot_core::core_version());

    let service = ResourceService::new(MemoryResourceStore::new());

    let drafts = [
        NewResource {
            name: "Ship weekly report".to_string(),
            category: Some("reporting".to_string()),
            priority: Some(Priority::High),
            ..NewResource::default()
        },
        NewResource {
            name: "Refill office supplies".to_string(),
            category: Some("operations".to_string()),
            ..NewResource::default()
        },
    ];
    for draft in drafts {
        match service.create(draft) {
            Ok(created) => println!("created id={} name={}", created.id, created.name),
            Err(err) => eprintln!("create failed: {err}"),
        }
    }

    let query = ListQuery {
        filter: FilterSpec {
            completed: Some(false),
            ..FilterSpec::default()
        },
        ..ListQuery::default()
    };
    match service.list(&query) {
        Ok(page) => println!(
            "listed {} of {} pending resources",
            page.items.len(),
            page.meta.total_items
        ),
        Err(err) => eprintln!("list failed: {err}"),
    }

    match service.stats() {
        Ok(stats) => match serde_json::to_string_pretty(&stats) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("stats rendering failed: {err}"),
        },
        Err(err) => eprintln!("stats failed: {err}"),
    }
}
