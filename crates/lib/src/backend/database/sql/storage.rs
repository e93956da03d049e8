//! List storage operations for SQL backends.

use crate::Result;
use crate::backend::errors::BackendError;
use crate::list::{ListItem, ShoppingList};

use super::{SqlxBackend, SqlxResultExt};

fn to_db_version(version: u64) -> Result<i64> {
    i64::try_from(version).map_err(|_| {
        BackendError::StateInconsistency {
            reason: format!("version {version} does not fit in a BIGINT column"),
        }
        .into()
    })
}

fn from_db_version(version: i64) -> Result<u64> {
    u64::try_from(version).map_err(|_| {
        BackendError::StateInconsistency {
            reason: format!("negative version {version} stored"),
        }
        .into()
    })
}

/// Get a list by key.
pub async fn get(backend: &SqlxBackend, id: &str) -> Result<Option<ShoppingList>> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT version, list_json FROM shopping_lists WHERE id = $1")
            .bind(id)
            .fetch_optional(backend.pool())
            .await
            .sql_context("Failed to get list")?;

    match row {
        Some((version, json)) => {
            let items: Vec<ListItem> = serde_json::from_str(&json)
                .map_err(|e| BackendError::DeserializationFailed { source: e })?;
            Ok(Some(ShoppingList {
                id: id.to_string(),
                list: items,
                version: from_db_version(version)?,
            }))
        }
        None => Ok(None),
    }
}

/// Insert or replace a list, checking its version against the stored one.
///
/// Each write is a single conditional statement, so the version compare and the
/// write happen under one lock acquisition. A version-0 record inserts only if
/// no row exists; any other version updates only the row still at that version.
pub async fn upsert(backend: &SqlxBackend, mut list: ShoppingList) -> Result<ShoppingList> {
    let list_json = serde_json::to_string(&list.list)
        .map_err(|e| BackendError::SerializationFailed { source: e })?;
    let next = list.version.checked_add(1).ok_or_else(|| BackendError::StateInconsistency {
        reason: format!("version of list '{}' overflowed", list.id),
    })?;

    let written = if list.version == 0 {
        sqlx::query(
            "INSERT INTO shopping_lists (id, version, list_json) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&list.id)
        .bind(to_db_version(next)?)
        .bind(&list_json)
        .execute(backend.pool())
        .await
        .sql_context("Failed to insert list")?
    } else {
        sqlx::query(
            "UPDATE shopping_lists SET version = $1, list_json = $2
             WHERE id = $3 AND version = $4",
        )
        .bind(to_db_version(next)?)
        .bind(&list_json)
        .bind(&list.id)
        .bind(to_db_version(list.version)?)
        .execute(backend.pool())
        .await
        .sql_context("Failed to update list")?
    };

    if written.rows_affected() == 0 {
        // Another writer got there first; report what is stored now
        let actual = stored_version(backend, &list.id).await?;
        tracing::debug!(list_id = %list.id, expected = list.version, ?actual, "Version conflict");
        return Err(BackendError::VersionConflict {
            list_id: list.id,
            expected: list.version,
            actual,
        }
        .into());
    }

    list.version = next;
    Ok(list)
}

async fn stored_version(backend: &SqlxBackend, id: &str) -> Result<Option<u64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT version FROM shopping_lists WHERE id = $1")
        .bind(id)
        .fetch_optional(backend.pool())
        .await
        .sql_context("Failed to read list version")?;
    row.map(|(v,)| from_db_version(v)).transpose()
}

/// Get every stored list key, sorted.
pub async fn list_ids(backend: &SqlxBackend) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM shopping_lists ORDER BY id")
        .fetch_all(backend.pool())
        .await
        .sql_context("Failed to list ids")?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
