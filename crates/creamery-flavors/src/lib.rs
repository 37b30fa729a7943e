//! Flavor model and catalog queries for the Creamery service.
//!
//! Every operation is a single parameterized SQL statement against a
//! `rusqlite::Connection`; callers own connection acquisition and any
//! blocking-context concerns. Absence is a first-class outcome here:
//! operations that target one row by id return [`FlavorError::NotFound`]
//! when nothing matches, so the HTTP layer can answer 404 instead of an
//! empty success body.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during flavor operations.
#[derive(Debug, Error)]
pub enum FlavorError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("flavor not found: {0}")]
    NotFound(i64),
}

/// One row of the flavor catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flavor {
    /// Database-assigned ID.
    pub id: i64,
    /// Display name, at most 100 characters.
    pub name: String,
    /// Whether this flavor is marked as a favorite.
    pub is_favorite: bool,
    /// Creation timestamp (ISO 8601 UTC). Never changes after insert.
    pub created_at: String,
    /// Last-modified timestamp (ISO 8601 UTC). Refreshed on every update.
    pub updated_at: String,
}

/// Parameters for creating a new flavor.
#[derive(Debug, Clone)]
pub struct NewFlavor {
    pub name: String,
    pub is_favorite: bool,
}

/// Parameters for updating an existing flavor. Both fields are applied
/// as given; there are no partial-update semantics.
#[derive(Debug, Clone)]
pub struct FlavorUpdate {
    pub name: String,
    pub is_favorite: bool,
}

/// Current wall-clock time as ISO 8601 UTC with microsecond precision.
///
/// Written by the application rather than the database so that successive
/// updates produce strictly increasing `updated_at` values.
fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_row_to_flavor(row: &Row<'_>) -> rusqlite::Result<Flavor> {
    Ok(Flavor {
        id: row.get(0)?,
        name: row.get(1)?,
        is_favorite: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Inserts a new flavor and returns the stored row.
pub fn create_flavor(conn: &Connection, params: &NewFlavor) -> Result<Flavor, FlavorError> {
    let now = now_utc();
    conn.execute(
        "INSERT INTO flavors (name, is_favorite, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)",
        params![params.name, params.is_favorite, now],
    )?;
    get_flavor(conn, conn.last_insert_rowid())
}

/// Retrieves a flavor by id.
pub fn get_flavor(conn: &Connection, id: i64) -> Result<Flavor, FlavorError> {
    conn.query_row(
        "SELECT id, name, is_favorite, created_at, updated_at
         FROM flavors WHERE id = ?1",
        [id],
        map_row_to_flavor,
    )
    .optional()?
    .ok_or(FlavorError::NotFound(id))
}

/// Lists the whole catalog in id order.
pub fn list_flavors(conn: &Connection) -> Result<Vec<Flavor>, FlavorError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, is_favorite, created_at, updated_at
         FROM flavors ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_row_to_flavor)?;
    let mut flavors = Vec::new();
    for row in rows {
        flavors.push(row?);
    }
    Ok(flavors)
}

/// Applies an update to the flavor with the given id and returns the new row.
///
/// Refreshes `updated_at` to the current time; `created_at` is untouched.
pub fn update_flavor(
    conn: &Connection,
    id: i64,
    params: &FlavorUpdate,
) -> Result<Flavor, FlavorError> {
    let now = now_utc();
    let affected = conn.execute(
        "UPDATE flavors SET name = ?1, is_favorite = ?2, updated_at = ?3
         WHERE id = ?4",
        params![params.name, params.is_favorite, now, id],
    )?;
    if affected == 0 {
        return Err(FlavorError::NotFound(id));
    }
    get_flavor(conn, id)
}

/// Deletes the flavor with the given id.
pub fn delete_flavor(conn: &Connection, id: i64) -> Result<(), FlavorError> {
    let affected = conn.execute("DELETE FROM flavors WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(FlavorError::NotFound(id));
    }
    Ok(())
}
