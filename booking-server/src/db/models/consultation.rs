//! Consultation storage document
//!
//! Field names are snake_case in the store; the record key equals
//! `consultation_id`. The SurrealDB `id` (a record link) is never read back:
//! serde ignores it because the document has no `id` field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Consultation, ConsultationStatus};

pub const TABLE: &str = "consultation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationDocument {
    pub consultation_id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub restaurant_id: Option<String>,
    pub event_type: String,
    pub guest_count: Option<u32>,
    pub budget_range: Option<String>,
    pub preferred_date_start: Option<NaiveDate>,
    pub preferred_date_end: Option<NaiveDate>,
    pub details: Option<String>,
    pub status: ConsultationStatus,
    pub assigned_specialist_id: Option<String>,
    pub assigned_specialist_name: Option<String>,
    pub assigned_at: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<ConsultationDocument> for Consultation {
    fn from(doc: ConsultationDocument) -> Self {
        Self {
            id: doc.consultation_id,
            customer_id: doc.customer_id,
            customer_name: doc.customer_name,
            customer_email: doc.customer_email,
            customer_phone: doc.customer_phone,
            restaurant_id: doc.restaurant_id,
            event_type: doc.event_type,
            guest_count: doc.guest_count,
            budget_range: doc.budget_range,
            preferred_date_start: doc.preferred_date_start,
            preferred_date_end: doc.preferred_date_end,
            details: doc.details,
            status: doc.status,
            assigned_specialist_id: doc.assigned_specialist_id,
            assigned_specialist_name: doc.assigned_specialist_name,
            assigned_at: doc.assigned_at,
            notes: doc.notes,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Partial update for a status change. `notes: None` keeps the previous note.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch {
    pub status: ConsultationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: i64,
}

/// Partial update for a specialist assignment
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentPatch {
    pub assigned_specialist_id: String,
    pub assigned_specialist_name: String,
    pub assigned_at: i64,
    pub updated_at: i64,
}
