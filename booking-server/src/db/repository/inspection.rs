//! Inspection Repository
//!
//! Read-only access to arbitrary tables for the diagnostic tool. Restaurant
//! tables are owned elsewhere and were renamed over time, so lookups walk a
//! list of candidate names and keep the first one holding data.

use super::{BaseRepository, RepoError, RepoResult};
use serde::Deserialize;
use serde_json::Value;
use shared::models::{RestaurantProfile, RestaurantSpace};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub const PROFILE_TABLES: &[&str] = &["restaurant_profile", "restaurantprofiles"];
pub const SPACE_TABLES: &[&str] = &["restaurant_space", "restaurantspaces"];
pub const CONSULTATION_TABLES: &[&str] = &["consultation", "consultations"];

const ALIAS_GROUPS: &[&[&str]] = &[PROFILE_TABLES, SPACE_TABLES, CONSULTATION_TABLES];

/// Upper bound for a single dump
pub const MAX_DUMP_LIMIT: u32 = 1000;

/// `field = value` condition for a dump
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: String,
    pub value: Value,
}

impl FieldMatch {
    /// `value` is read as JSON when it parses (`10`, `true`, `"x"`), as a plain string otherwise
    pub fn parse(field: impl Into<String>, value: &str) -> Self {
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        Self {
            field: field.into(),
            value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// Table and the number of records it holds
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TableCount {
    pub table: String,
    pub count: u64,
}

/// Table names and field paths are interpolated, so only plain identifiers pass
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Names to try for a requested table: the requested one first, then its known aliases
pub fn candidate_tables(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if let Some(group) = ALIAS_GROUPS.iter().find(|group| group.contains(&name)) {
        names.extend(group.iter().filter(|t| **t != name).map(|t| t.to_string()));
    }
    names
}

/// SurrealQL for a dump of one table. Bindings are `$tb`, `$limit` and `$v0..$vN`.
pub fn dump_query(matches: &[FieldMatch]) -> String {
    let mut sql = String::from("SELECT *, <string> id AS record_id OMIT id FROM type::table($tb)");
    if !matches.is_empty() {
        let conditions: Vec<String> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{} = $v{}", m.field, i))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" LIMIT $limit");
    sql
}

#[derive(Clone, Debug)]
pub struct InspectionRepository {
    base: BaseRepository,
}

impl InspectionRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Names of the tables defined in the current database, sorted
    pub async fn table_names(&self) -> RepoResult<Vec<String>> {
        let info: Option<Value> = self.base.db().query("INFO FOR DB").await?.take(0)?;
        let mut names: Vec<String> = info
            .as_ref()
            .and_then(|v| v.get("tables"))
            .and_then(Value::as_object)
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }

    /// Tables defined in the current database with their record counts
    pub async fn list_tables(&self) -> RepoResult<Vec<TableCount>> {
        let names = self.table_names().await?;
        let mut counts = Vec::with_capacity(names.len());
        for table in names {
            let count = self.count(&table).await?;
            counts.push(TableCount { table, count });
        }
        Ok(counts)
    }

    pub async fn count(&self, table: &str) -> RepoResult<u64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM type::table($tb) GROUP ALL")
            .bind(("tb", table.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.count).unwrap_or(0))
    }

    /// Records of one table matching every condition
    pub async fn dump(
        &self,
        table: &str,
        matches: &[FieldMatch],
        limit: u32,
    ) -> RepoResult<Vec<Value>> {
        if !is_identifier(table) {
            return Err(RepoError::Validation(format!("Invalid table name: {table}")));
        }
        if let Some(bad) = matches.iter().find(|m| !is_identifier(&m.field)) {
            return Err(RepoError::Validation(format!("Invalid field name: {}", bad.field)));
        }

        let mut query = self
            .base
            .db()
            .query(dump_query(matches))
            .bind(("tb", table.to_string()))
            .bind(("limit", limit.clamp(1, MAX_DUMP_LIMIT)));
        for (i, m) in matches.iter().enumerate() {
            query = query.bind((format!("v{i}"), m.value.clone()));
        }
        let rows: Vec<Value> = query.await?.take(0)?;
        Ok(rows)
    }

    /// Dump the first candidate table that yields records.
    ///
    /// Returns the table that answered, or `None` when every candidate is empty.
    pub async fn dump_first(
        &self,
        candidates: &[String],
        matches: &[FieldMatch],
        limit: u32,
    ) -> RepoResult<Option<(String, Vec<Value>)>> {
        for table in candidates {
            let rows = self.dump(table, matches, limit).await?;
            if !rows.is_empty() {
                tracing::debug!(table = %table, rows = rows.len(), "Candidate table matched");
                return Ok(Some((table.clone(), rows)));
            }
        }
        Ok(None)
    }

    /// Restaurant profile by record key, trying every known profile table
    pub async fn find_profile(&self, id: &str) -> RepoResult<Option<(String, RestaurantProfile)>> {
        for table in PROFILE_TABLES {
            let rows: Vec<RestaurantProfile> = self
                .base
                .db()
                .query("SELECT *, <string> record::id(id) AS key OMIT id FROM type::thing($tb, $id)")
                .bind(("tb", table.to_string()))
                .bind(("id", id.to_string()))
                .await?
                .take(0)?;
            if let Some(profile) = rows.into_iter().next() {
                return Ok(Some((table.to_string(), profile)));
            }
        }
        Ok(None)
    }

    /// Spaces owned by a restaurant; legacy documents use `restaurantId`
    pub async fn find_spaces(&self, restaurant_id: &str) -> RepoResult<(Option<String>, Vec<RestaurantSpace>)> {
        for table in SPACE_TABLES {
            let spaces: Vec<RestaurantSpace> = self
                .base
                .db()
                .query(
                    "SELECT *, <string> record::id(id) AS key OMIT id FROM type::table($tb) \
                     WHERE restaurant_id = $rid OR restaurantId = $rid ORDER BY name",
                )
                .bind(("tb", table.to_string()))
                .bind(("rid", restaurant_id.to_string()))
                .await?
                .take(0)?;
            if !spaces.is_empty() {
                return Ok((Some(table.to_string()), spaces));
            }
        }
        Ok((None, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidates_start_with_requested_name() {
        assert_eq!(
            candidate_tables("restaurantspaces"),
            vec!["restaurantspaces", "restaurant_space"]
        );
        assert_eq!(
            candidate_tables("restaurant_profile"),
            vec!["restaurant_profile", "restaurantprofiles"]
        );
        assert_eq!(candidate_tables("audit"), vec!["audit"]);
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_identifier("restaurant_space"));
        assert!(is_identifier("address.city"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a; REMOVE TABLE consultation"));
        assert!(!is_identifier("a..b"));
    }

    #[test]
    fn test_field_match_value_parsing() {
        assert_eq!(FieldMatch::parse("max_capacity", "40").value, json!(40));
        assert_eq!(FieldMatch::parse("active", "true").value, json!(true));
        assert_eq!(FieldMatch::parse("name", "Garden").value, json!("Garden"));
    }

    #[test]
    fn test_dump_query() {
        assert_eq!(
            dump_query(&[]),
            "SELECT *, <string> id AS record_id OMIT id FROM type::table($tb) LIMIT $limit"
        );
        let matches = vec![
            FieldMatch::parse("restaurant_id", "r1"),
            FieldMatch::parse("max_capacity", "40"),
        ];
        assert!(dump_query(&matches).ends_with("WHERE restaurant_id = $v0 AND max_capacity = $v1 LIMIT $limit"));
    }
}
