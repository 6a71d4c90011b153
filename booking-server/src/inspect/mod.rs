//! Data inspection for operators
//!
//! A session owns one database client for the lifetime of a command and is
//! always closed afterwards, whether the command succeeded or not.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use shared::models::{RestaurantProfile, RestaurantSpace};

use crate::core::DatabaseConfig;
use crate::db::DbService;
use crate::db::repository::InspectionRepository;
use crate::db::repository::inspection::{FieldMatch, TableCount, candidate_tables};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Scoped connection for diagnostic commands
#[derive(Debug)]
pub struct InspectSession {
    db: DbService,
    url: String,
}

impl InspectSession {
    /// Connect without touching the schema; the store may be owned by another service
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        let db = DbService::connect(config).await?;
        Ok(Self {
            db,
            url: config.url.clone(),
        })
    }

    pub fn repository(&self) -> InspectionRepository {
        InspectionRepository::new(self.db.db.clone())
    }

    /// End the auth session and drop the client handle.
    ///
    /// The connection shuts down once the last clone of the client is gone;
    /// `run` hands the command a clone that is dropped with its future.
    pub async fn close(self) {
        let Self { db, url } = self;
        if let Err(e) = db.db.invalidate().await {
            tracing::debug!(error = %e, "Session invalidate failed");
        }
        drop(db);
        tracing::info!(url = %url, "Inspection session closed");
    }

    /// Run one command, closing the session on success and on failure
    pub async fn run<F, Fut, T>(self, command: F) -> AppResult<T>
    where
        F: FnOnce(InspectionRepository) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let result = command(self.repository()).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Inspection command failed");
        }
        self.close().await;
        result
    }
}

/// Result of a dump
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    /// Table that produced the rows (may be a legacy alias of the requested one)
    pub table: String,
    pub rows: Vec<Value>,
}

/// Restaurant profile with its spaces
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantReport {
    pub profile_table: String,
    pub profile: RestaurantProfile,
    pub space_table: Option<String>,
    pub spaces: Vec<RestaurantSpace>,
    /// Spaces whose capacity range is inverted
    pub invalid_spaces: Vec<String>,
}

pub async fn collections(repo: InspectionRepository) -> AppResult<Vec<TableCount>> {
    Ok(repo.list_tables().await?)
}

/// Dump `table`, falling back to its historical names when it yields nothing.
///
/// An empty report means the table exists but nothing matched; a table
/// missing under every known name is `CollectionNotFound`.
pub async fn dump(
    repo: InspectionRepository,
    table: String,
    matches: Vec<FieldMatch>,
    limit: u32,
) -> AppResult<DumpReport> {
    let candidates = candidate_tables(&table);
    if let Some((table, rows)) = repo.dump_first(&candidates, &matches, limit).await? {
        return Ok(DumpReport { table, rows });
    }

    let existing = repo.table_names().await?;
    if !candidates.iter().any(|c| existing.contains(c)) {
        return Err(AppError::with_message(
            ErrorCode::CollectionNotFound,
            format!("Collection {table} not found"),
        )
        .with_detail("tried", candidates));
    }

    tracing::info!(tried = ?candidates, "No matching records in any candidate table");
    Ok(DumpReport {
        table,
        rows: Vec::new(),
    })
}

pub async fn restaurant(repo: InspectionRepository, id: String) -> AppResult<RestaurantReport> {
    let (profile_table, profile) = repo.find_profile(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::RestaurantNotFound, format!("Restaurant {id} not found"))
            .with_detail("id", id.clone())
    })?;
    let (space_table, spaces) = repo.find_spaces(&profile.id).await?;
    let invalid_spaces = spaces
        .iter()
        .filter(|s| !s.has_valid_capacity())
        .map(|s| s.id.clone())
        .collect();

    Ok(RestaurantReport {
        profile_table,
        profile,
        space_table,
        spaces,
        invalid_spaces,
    })
}

/// Pair up repeated `--field` / `--equals` flags
pub fn parse_matches(fields: &[String], values: &[String]) -> AppResult<Vec<FieldMatch>> {
    if fields.len() != values.len() {
        return Err(AppError::validation(format!(
            "Every --field needs an --equals ({} fields, {} values)",
            fields.len(),
            values.len()
        )));
    }
    Ok(fields
        .iter()
        .zip(values)
        .map(|(field, value)| FieldMatch::parse(field.as_str(), value))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_matches_pairs_flags() {
        let matches = parse_matches(
            &["restaurant_id".into(), "max_capacity".into()],
            &["r1".into(), "40".into()],
        )
        .unwrap();
        assert_eq!(matches[0].value, json!("r1"));
        assert_eq!(matches[1].value, json!(40));

        let err = parse_matches(&["name".into()], &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
