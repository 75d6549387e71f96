//! SQLite-backed resource store.
//!
//! # Responsibility
//! - Persist resources in the `resources` table opened via [`crate::db`].
//! - Map schema-level name-key collisions to [`StoreError::NameTaken`].
//!
//! # Invariants
//! - The connection must be migrated before a store is constructed over it.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::resource::{
    name_key, now_epoch_ms, NewResource, Priority, Resource, ResourceId, ResourcePatch,
};
use crate::store::{ResourceStore, StoreError, StoreResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const RESOURCE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    completed,
    priority,
    category,
    price,
    created_at,
    updated_at,
    due_at
FROM resources";

/// Durable store over a borrowed, migrated connection.
///
/// `rusqlite::Connection` is not `Sync`, so this backend serves the
/// single-threaded regime; the schema's UNIQUE name key still guards the
/// check-and-insert sequence against other connections on the same file.
pub struct SqliteResourceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResourceStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResourceStore for SqliteResourceStore<'_> {
    fn get_all(&self) -> StoreResult<Vec<Resource>> {
        let mut stmt = self.conn.prepare(&format!("{RESOURCE_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut resources = Vec::new();
        while let Some(row) = rows.next()? {
            resources.push(parse_resource_row(row)?);
        }
        Ok(resources)
    }

    fn get(&self, id: ResourceId) -> StoreResult<Option<Resource>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESOURCE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_resource_row(row)?));
        }
        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Resource>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESOURCE_SELECT_SQL} WHERE name_key = ?1;"))?;
        let mut rows = stmt.query([name_key(name)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_resource_row(row)?));
        }
        Ok(None)
    }

    fn create(&self, draft: NewResource, completed: bool) -> StoreResult<Resource> {
        let resource = Resource::from_draft(Uuid::new_v4(), draft, completed, now_epoch_ms());
        let result = self.conn.execute(
            "INSERT INTO resources (
                id,
                name,
                name_key,
                description,
                completed,
                priority,
                category,
                price,
                created_at,
                updated_at,
                due_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                resource.id.to_string(),
                resource.name.as_str(),
                name_key(&resource.name),
                resource.description.as_deref(),
                bool_to_int(resource.completed),
                priority_to_db(resource.priority),
                resource.category.as_deref(),
                resource.price,
                resource.created_at,
                resource.updated_at,
                resource.due_at,
            ],
        );

        match result {
            Ok(_) => Ok(resource),
            Err(err) => Err(map_name_collision(err, &resource.name)),
        }
    }

    fn update(&self, id: ResourceId, patch: ResourcePatch) -> StoreResult<Option<Resource>> {
        let Some(mut resource) = self.get(id)? else {
            return Ok(None);
        };
        resource.apply_patch(patch, now_epoch_ms());

        let result = self.conn.execute(
            "UPDATE resources
             SET
                name = ?2,
                name_key = ?3,
                description = ?4,
                completed = ?5,
                priority = ?6,
                category = ?7,
                price = ?8,
                updated_at = ?9,
                due_at = ?10
             WHERE id = ?1;",
            params![
                id.to_string(),
                resource.name.as_str(),
                name_key(&resource.name),
                resource.description.as_deref(),
                bool_to_int(resource.completed),
                priority_to_db(resource.priority),
                resource.category.as_deref(),
                resource.price,
                resource.updated_at,
                resource.due_at,
            ],
        );

        match result {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(resource)),
            Err(err) => Err(map_name_collision(err, &resource.name)),
        }
    }

    fn delete(&self, id: ResourceId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM resources WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM resources;", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn parse_resource_row(row: &Row<'_>) -> StoreResult<Resource> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{id_text}` in resources.id"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid priority value `{priority_text}` in resources.priority"
        ))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in resources.completed"
            )));
        }
    };

    Ok(Resource {
        id,
        name: row.get("name")?,
        description: row.get("description")?,
        completed,
        priority,
        category: row.get("category")?,
        price: row.get("price")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        due_at: row.get("due_at")?,
    })
}

fn map_name_collision(err: rusqlite::Error, name: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::NameTaken(name.to_string());
        }
    }
    err.into()
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
