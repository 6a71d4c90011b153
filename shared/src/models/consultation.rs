//! Consultation Model
//!
//! 活动咨询：客户提交的宴会/活动策划咨询请求，由专员跟进处理。

use crate::error::{AppError, ErrorCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Wire format for calendar dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Consultation lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    /// Submitted by the customer, nobody working on it yet
    #[default]
    Pending,
    /// A specialist is actively working on it
    InProgress,
    /// A meeting/tasting has been scheduled with the customer
    Scheduled,
    /// Finished
    Completed,
    /// Abandoned by either side
    Cancelled,
}

impl ConsultationStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ConsultationStatus; 5] = [
        ConsultationStatus::Pending,
        ConsultationStatus::InProgress,
        ConsultationStatus::Scheduled,
        ConsultationStatus::Completed,
        ConsultationStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                AppError::with_message(
                    ErrorCode::InvalidConsultationStatus,
                    format!(
                        "Invalid status '{}', expected one of: {}",
                        wanted,
                        allowed.join(", ")
                    ),
                )
                .with_detail("status", wanted)
            })
    }
}

/// Consultation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    /// Venue the event is planned at (restaurant profile id)
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
    /// 分配时间 (Unix millis)
    pub assigned_at: Option<i64>,
    /// Note attached to the latest status change
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create consultation payload
///
/// Required fields default to empty so that a missing field is reported as a
/// validation error by the service rather than a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationCreate {
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
}

/// PATCH /consultations/{id}/status payload
///
/// `status` stays a plain string: membership in [`ConsultationStatus`] is a
/// business rule checked by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationStatusUpdate {
    pub status: String,
    pub notes: Option<String>,
}

/// PATCH /consultations/{id}/assign payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialistAssignment {
    pub specialist_id: String,
    pub specialist_name: String,
}

/// Raw list query (`GET /consultations?status=...&dateFrom=...`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationQuery {
    pub status: Option<String>,
    pub assigned_specialist_id: Option<String>,
    pub event_type: Option<String>,
    pub budget_range: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Typed list filter. `None` means "do not filter on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationFilter {
    pub status: Option<ConsultationStatus>,
    pub assigned_specialist_id: Option<String>,
    pub event_type: Option<String>,
    pub budget_range: Option<String>,
    /// Inclusive lower bound on `preferred_date_start`
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `preferred_date_start`
    pub date_to: Option<NaiveDate>,
}

/// Blank query values (`?status=`) count as absent.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` date, naming the offending field on failure.
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{} must be a date formatted as YYYY-MM-DD", field),
        )
        .with_detail("field", field)
        .with_detail("value", value)
    })
}

impl TryFrom<ConsultationQuery> for ConsultationFilter {
    type Error = AppError;

    fn try_from(query: ConsultationQuery) -> Result<Self, Self::Error> {
        let status = present(query.status)
            .map(|s| s.parse::<ConsultationStatus>())
            .transpose()?;
        let date_from = present(query.date_from)
            .map(|d| parse_date(&d, "dateFrom"))
            .transpose()?;
        let date_to = present(query.date_to)
            .map(|d| parse_date(&d, "dateTo"))
            .transpose()?;

        Ok(Self {
            status,
            assigned_specialist_id: present(query.assigned_specialist_id),
            event_type: present(query.event_type),
            budget_range: present(query.budget_range),
            date_from,
            date_to,
        })
    }
}

/// Aggregate counts over all consultations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationStats {
    /// Always equals the sum of `by_status`
    pub total: u64,
    /// Every status is present, zero when unused
    pub by_status: BTreeMap<ConsultationStatus, u64>,
    pub by_event_type: BTreeMap<String, u64>,
    /// Consultations without an assigned specialist
    pub unassigned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "pending".parse::<ConsultationStatus>().unwrap(),
            ConsultationStatus::Pending
        );
        assert_eq!(
            " in_progress ".parse::<ConsultationStatus>().unwrap(),
            ConsultationStatus::InProgress
        );
        let err = "archived".parse::<ConsultationStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConsultationStatus);
        assert!(err.message.contains("archived"));
    }

    #[test]
    fn test_status_wire_form_matches_as_str() {
        for status in ConsultationStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, json!(status.as_str()));
        }
    }

    #[test]
    fn test_create_payload_missing_fields_default_to_empty() {
        let payload: ConsultationCreate =
            serde_json::from_value(json!({"budgetRange": "5000-10000"})).unwrap();
        assert!(payload.customer_id.is_empty());
        assert!(payload.event_type.is_empty());
        assert_eq!(payload.budget_range.as_deref(), Some("5000-10000"));
    }

    #[test]
    fn test_query_to_filter_strips_blank_values() {
        let query = ConsultationQuery {
            status: Some("".into()),
            event_type: Some("  ".into()),
            budget_range: Some("5000-10000".into()),
            ..Default::default()
        };
        let filter = ConsultationFilter::try_from(query).unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.event_type, None);
        assert_eq!(filter.budget_range.as_deref(), Some("5000-10000"));
    }

    #[test]
    fn test_query_to_filter_parses_dates_and_status() {
        let query = ConsultationQuery {
            status: Some("completed".into()),
            date_from: Some("2026-05-01".into()),
            date_to: Some("2026-05-31".into()),
            ..Default::default()
        };
        let filter = ConsultationFilter::try_from(query).unwrap();
        assert_eq!(filter.status, Some(ConsultationStatus::Completed));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2026, 5, 1));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2026, 5, 31));
    }

    #[test]
    fn test_query_to_filter_rejects_bad_date() {
        let query = ConsultationQuery {
            date_from: Some("05/01/2026".into()),
            ..Default::default()
        };
        let err = ConsultationFilter::try_from(query).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_blank_query_values_do_not_filter() {
        let query = ConsultationQuery {
            status: Some("".into()),
            event_type: Some("   ".into()),
            ..Default::default()
        };
        let filter = ConsultationFilter::try_from(query).unwrap();
        assert_eq!(filter, ConsultationFilter::default());
    }

    #[test]
    fn test_stats_serialize_status_keys() {
        let mut stats = ConsultationStats::default();
        stats.by_status.insert(ConsultationStatus::InProgress, 2);
        stats.total = 2;
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["byStatus"]["in_progress"], 2);
        assert_eq!(value["total"], 2);
    }
}
