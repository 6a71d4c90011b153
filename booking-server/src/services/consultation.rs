//! Consultation Service
//!
//! Lifecycle of event-booking consultations: intake, lookup, filtered
//! listing, status changes, specialist assignment and aggregate stats.

use std::collections::BTreeMap;

use shared::models::{
    Consultation, ConsultationCreate, ConsultationFilter, ConsultationStats, ConsultationStatus,
};
use shared::util::{new_record_id, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::db::models::{AssignmentPatch, ConsultationDocument, StatusPatch};
use crate::db::repository::ConsultationRepository;
use crate::db::repository::consultation::ConsultationCounts;
use crate::utils::validation::{
    MAX_DETAILS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    normalize_optional, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone, Debug)]
pub struct ConsultationService {
    repo: ConsultationRepository,
}

impl ConsultationService {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            repo: ConsultationRepository::new(db),
        }
    }

    /// 创建咨询 - 状态固定为 pending
    pub async fn create_consultation(&self, data: ConsultationCreate) -> AppResult<Consultation> {
        validate_create(&data)?;

        let now = now_millis();
        let doc = ConsultationDocument {
            consultation_id: new_record_id(),
            customer_id: data.customer_id.trim().to_string(),
            customer_name: normalize_optional(data.customer_name),
            customer_email: normalize_optional(data.customer_email),
            customer_phone: normalize_optional(data.customer_phone),
            restaurant_id: normalize_optional(data.restaurant_id),
            event_type: data.event_type.trim().to_string(),
            guest_count: data.guest_count,
            budget_range: normalize_optional(data.budget_range),
            preferred_date_start: data.preferred_date_start,
            preferred_date_end: data.preferred_date_end,
            details: normalize_optional(data.details),
            status: ConsultationStatus::Pending,
            assigned_specialist_id: None,
            assigned_specialist_name: None,
            assigned_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(doc).await?;
        tracing::info!(
            consultation_id = %created.consultation_id,
            customer_id = %created.customer_id,
            event_type = %created.event_type,
            "Consultation created"
        );
        Ok(created.into())
    }

    pub async fn get_consultation_by_id(&self, id: &str) -> AppResult<Consultation> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Consultation::from)
            .ok_or_else(|| AppError::consultation_not_found(id))
    }

    /// 客户的全部咨询, 最新在前
    pub async fn get_consultations_by_customer(&self, customer_id: &str) -> AppResult<Vec<Consultation>> {
        let docs = self.repo.find_by_customer(customer_id.trim()).await?;
        Ok(docs.into_iter().map(Consultation::from).collect())
    }

    /// Every consultation matching all present filter fields
    pub async fn get_all_consultations(&self, filter: ConsultationFilter) -> AppResult<Vec<Consultation>> {
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to)
            && from > to
        {
            return Err(AppError::with_message(
                ErrorCode::InvalidDateRange,
                "dateFrom must not be after dateTo",
            )
            .with_detail("dateFrom", from.to_string())
            .with_detail("dateTo", to.to_string()));
        }

        let docs = self.repo.find_filtered(&filter).await?;
        Ok(docs.into_iter().map(Consultation::from).collect())
    }

    /// 更新状态
    ///
    /// The status is checked before the store is touched, so an invalid value
    /// never modifies the record. `notes: None` keeps the previous note.
    pub async fn update_consultation_status(
        &self,
        id: &str,
        status: &str,
        notes: Option<String>,
    ) -> AppResult<Consultation> {
        let status: ConsultationStatus = status.parse()?;
        let notes = normalize_optional(notes);
        validate_optional_text(&notes, "notes", MAX_NOTE_LEN)?;

        let patch = StatusPatch {
            status,
            notes,
            updated_at: now_millis(),
        };
        let updated = self
            .repo
            .update_status(id, patch)
            .await?
            .ok_or_else(|| AppError::consultation_not_found(id))?;

        tracing::info!(consultation_id = %id, status = %status, "Consultation status updated");
        Ok(updated.into())
    }

    /// 分配专员 - id 和姓名一起写入, 状态不变
    pub async fn assign_specialist(
        &self,
        id: &str,
        specialist_id: &str,
        specialist_name: &str,
    ) -> AppResult<Consultation> {
        let specialist_id = specialist_id.trim();
        let specialist_name = specialist_name.trim();
        if specialist_id.is_empty() || specialist_name.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::SpecialistRequired,
                "specialistId and specialistName are required",
            ));
        }
        validate_required_text(specialist_id, "specialistId", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(specialist_name, "specialistName", MAX_NAME_LEN)?;

        let now = now_millis();
        let patch = AssignmentPatch {
            assigned_specialist_id: specialist_id.to_string(),
            assigned_specialist_name: specialist_name.to_string(),
            assigned_at: now,
            updated_at: now,
        };
        let updated = self
            .repo
            .assign_specialist(id, patch)
            .await?
            .ok_or_else(|| AppError::consultation_not_found(id))?;

        tracing::info!(consultation_id = %id, specialist_id = %specialist_id, "Specialist assigned");
        Ok(updated.into())
    }

    pub async fn get_consultation_stats(&self) -> AppResult<ConsultationStats> {
        let counts = self.repo.counts().await?;
        Ok(shape_stats(counts))
    }
}

fn validate_create(data: &ConsultationCreate) -> AppResult<()> {
    validate_required_text(&data.customer_id, "customerId", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.event_type, "eventType", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_optional_text(&data.customer_email, "customerEmail", MAX_EMAIL_LEN)?;
    validate_optional_text(&data.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.restaurant_id, "restaurantId", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.budget_range, "budgetRange", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.details, "details", MAX_DETAILS_LEN)?;

    if data.guest_count == Some(0) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "guestCount must be at least 1",
        )
        .with_detail("field", "guestCount"));
    }
    if let (Some(start), Some(end)) = (data.preferred_date_start, data.preferred_date_end)
        && end < start
    {
        return Err(AppError::with_message(
            ErrorCode::InvalidDateRange,
            "preferredDateEnd must not be before preferredDateStart",
        ));
    }
    Ok(())
}

/// Zero-fill every status so `total == Σ by_status`
fn shape_stats(counts: ConsultationCounts) -> ConsultationStats {
    let mut by_status: BTreeMap<ConsultationStatus, u64> =
        ConsultationStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for (status, count) in counts.by_status {
        match status.parse::<ConsultationStatus>() {
            Ok(status) => *by_status.entry(status).or_default() += count,
            Err(_) => tracing::warn!(status = %status, count, "Unknown consultation status in store"),
        }
    }

    let by_event_type: BTreeMap<String, u64> = counts.by_event_type.into_iter().collect();
    let total = by_status.values().sum();

    ConsultationStats {
        total,
        by_status,
        by_event_type,
        unassigned: counts.unassigned,
    }
}
