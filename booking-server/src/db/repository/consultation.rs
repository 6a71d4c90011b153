//! Consultation Repository
//!
//! Every method is a single round-trip; SurrealDB guarantees per-statement
//! atomicity, which is all the lifecycle needs.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::consultation::TABLE;
use crate::db::models::{AssignmentPatch, ConsultationDocument, StatusPatch};
use serde::Deserialize;
use shared::models::ConsultationFilter;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// `(binding name, value)` pairs for a filtered select
pub type Bindings = Vec<(&'static str, String)>;

/// Raw per-group counts, shaped into `ConsultationStats` by the service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsultationCounts {
    pub by_status: Vec<(String, u64)>,
    pub by_event_type: Vec<(String, u64)>,
    pub unassigned: u64,
}

#[derive(Debug, Deserialize)]
struct StatusCountRow {
    status: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct EventTypeCountRow {
    event_type: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// Build the SurrealQL select for a sparse filter.
///
/// Only present fields become conditions; the date bounds apply to
/// `preferred_date_start` and exclude documents without one.
pub fn filter_query(filter: &ConsultationFilter) -> (String, Bindings) {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut bindings: Bindings = Vec::new();

    if let Some(status) = filter.status {
        conditions.push("status = $status");
        bindings.push(("status", status.as_str().to_string()));
    }
    if let Some(specialist) = &filter.assigned_specialist_id {
        conditions.push("assigned_specialist_id = $assigned_specialist_id");
        bindings.push(("assigned_specialist_id", specialist.clone()));
    }
    if let Some(event_type) = &filter.event_type {
        conditions.push("event_type = $event_type");
        bindings.push(("event_type", event_type.clone()));
    }
    if let Some(budget_range) = &filter.budget_range {
        conditions.push("budget_range = $budget_range");
        bindings.push(("budget_range", budget_range.clone()));
    }
    if filter.date_from.is_some() || filter.date_to.is_some() {
        conditions.push("preferred_date_start != NONE AND preferred_date_start != NULL");
    }
    // ISO dates compare correctly as strings
    if let Some(from) = filter.date_from {
        conditions.push("preferred_date_start >= $date_from");
        bindings.push(("date_from", from.to_string()));
    }
    if let Some(to) = filter.date_to {
        conditions.push("preferred_date_start <= $date_to");
        bindings.push(("date_to", to.to_string()));
    }

    let mut sql = format!("SELECT * FROM {TABLE}");
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC");
    (sql, bindings)
}

#[derive(Clone, Debug)]
pub struct ConsultationRepository {
    base: BaseRepository,
}

impl ConsultationRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new consultation keyed by its `consultation_id`
    pub async fn create(&self, doc: ConsultationDocument) -> RepoResult<ConsultationDocument> {
        let id = doc.consultation_id.clone();
        let created: Option<ConsultationDocument> =
            self.base.db().create((TABLE, id)).content(doc).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create consultation".to_string()))
    }

    /// Find consultation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ConsultationDocument>> {
        let doc: Option<ConsultationDocument> = self.base.db().select((TABLE, id)).await?;
        Ok(doc)
    }

    /// All consultations of a customer, newest first
    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<ConsultationDocument>> {
        let docs: Vec<ConsultationDocument> = self
            .base
            .db()
            .query("SELECT * FROM consultation WHERE customer_id = $customer_id ORDER BY created_at DESC")
            .bind(("customer_id", customer_id.to_string()))
            .await?
            .take(0)?;
        Ok(docs)
    }

    /// Consultations matching every present filter field, newest first
    pub async fn find_filtered(
        &self,
        filter: &ConsultationFilter,
    ) -> RepoResult<Vec<ConsultationDocument>> {
        let (sql, bindings) = filter_query(filter);
        let mut query = self.base.db().query(sql);
        for binding in bindings {
            query = query.bind(binding);
        }
        let docs: Vec<ConsultationDocument> = query.await?.take(0)?;
        Ok(docs)
    }

    /// Apply a status change. `None` when the consultation does not exist.
    pub async fn update_status(
        &self,
        id: &str,
        patch: StatusPatch,
    ) -> RepoResult<Option<ConsultationDocument>> {
        self.merge_by_id(id, patch).await
    }

    /// Set specialist id and name in one statement. `None` when the consultation does not exist.
    pub async fn assign_specialist(
        &self,
        id: &str,
        patch: AssignmentPatch,
    ) -> RepoResult<Option<ConsultationDocument>> {
        self.merge_by_id(id, patch).await
    }

    /// Table-scoped UPDATE so a missing id never creates a record
    async fn merge_by_id<P>(&self, id: &str, patch: P) -> RepoResult<Option<ConsultationDocument>>
    where
        P: serde::Serialize + 'static,
    {
        let updated: Vec<ConsultationDocument> = self
            .base
            .db()
            .query("UPDATE consultation MERGE $patch WHERE consultation_id = $id RETURN AFTER")
            .bind(("patch", patch))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Group counts by status and event type, plus unassigned total
    pub async fn counts(&self) -> RepoResult<ConsultationCounts> {
        let mut response = self
            .base
            .db()
            .query("SELECT status, count() AS count FROM consultation GROUP BY status")
            .query("SELECT event_type, count() AS count FROM consultation GROUP BY event_type")
            .query(
                "SELECT count() AS count FROM consultation \
                 WHERE assigned_specialist_id = NONE OR assigned_specialist_id = NULL GROUP ALL",
            )
            .await?;

        let by_status: Vec<StatusCountRow> = response.take(0)?;
        let by_event_type: Vec<EventTypeCountRow> = response.take(1)?;
        let unassigned: Vec<CountRow> = response.take(2)?;

        Ok(ConsultationCounts {
            by_status: by_status.into_iter().map(|r| (r.status, r.count)).collect(),
            by_event_type: by_event_type
                .into_iter()
                .map(|r| (r.event_type, r.count))
                .collect(),
            unassigned: unassigned.into_iter().next().map(|r| r.count).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::ConsultationStatus;

    #[test]
    fn test_empty_filter_selects_everything() {
        let (sql, bindings) = filter_query(&ConsultationFilter::default());
        assert_eq!(sql, "SELECT * FROM consultation ORDER BY created_at DESC");
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_filter_is_a_conjunction_of_present_fields() {
        let filter = ConsultationFilter {
            status: Some(ConsultationStatus::Pending),
            event_type: Some("wedding".into()),
            ..Default::default()
        };
        let (sql, bindings) = filter_query(&filter);
        assert_eq!(
            sql,
            "SELECT * FROM consultation WHERE status = $status AND event_type = $event_type ORDER BY created_at DESC"
        );
        assert_eq!(
            bindings,
            vec![("status", "pending".to_string()), ("event_type", "wedding".to_string())]
        );
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = ConsultationFilter {
            date_from: NaiveDate::from_ymd_opt(2026, 6, 1),
            date_to: NaiveDate::from_ymd_opt(2026, 6, 30),
            ..Default::default()
        };
        let (sql, bindings) = filter_query(&filter);
        assert!(sql.contains("preferred_date_start >= $date_from"));
        assert!(sql.contains("preferred_date_start <= $date_to"));
        assert!(sql.contains("preferred_date_start != NONE"));
        assert!(bindings.contains(&("date_from", "2026-06-01".to_string())));
        assert!(bindings.contains(&("date_to", "2026-06-30".to_string())));
    }
}
