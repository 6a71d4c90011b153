//! Consultation API Handlers

use axum::extract::{Path, State};
use http::StatusCode;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, JsonBody, QueryParams};
use shared::models::{
    Consultation, ConsultationCreate, ConsultationFilter, ConsultationQuery, ConsultationStats,
    ConsultationStatusUpdate, SpecialistAssignment,
};

/// POST /api/consultations - 创建咨询
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ConsultationCreate>,
) -> AppResult<(StatusCode, ApiResponse<Consultation>)> {
    let consultation = state.consultations.create_consultation(payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok_with_message(consultation, "Consultation created"),
    ))
}

/// GET /api/consultations - 按条件列出咨询
pub async fn list(
    State(state): State<ServerState>,
    QueryParams(query): QueryParams<ConsultationQuery>,
) -> AppResult<ApiResponse<Vec<Consultation>>> {
    let filter = ConsultationFilter::try_from(query)?;
    let consultations = state.consultations.get_all_consultations(filter).await?;
    Ok(ApiResponse::ok_with_message(consultations, "Consultations retrieved"))
}

/// GET /api/consultations/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<ApiResponse<ConsultationStats>> {
    let stats = state.consultations.get_consultation_stats().await?;
    Ok(ApiResponse::ok_with_message(stats, "Consultation stats retrieved"))
}

/// GET /api/consultations/customer/{customer_id}
pub async fn list_by_customer(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> AppResult<ApiResponse<Vec<Consultation>>> {
    let consultations = state
        .consultations
        .get_consultations_by_customer(&customer_id)
        .await?;
    Ok(ApiResponse::ok_with_message(
        consultations,
        "Customer consultations retrieved",
    ))
}

/// GET /api/consultations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Consultation>> {
    let consultation = state.consultations.get_consultation_by_id(&id).await?;
    Ok(ApiResponse::ok_with_message(consultation, "Consultation retrieved"))
}

/// PATCH /api/consultations/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ConsultationStatusUpdate>,
) -> AppResult<ApiResponse<Consultation>> {
    let consultation = state
        .consultations
        .update_consultation_status(&id, &payload.status, payload.notes)
        .await?;
    Ok(ApiResponse::ok_with_message(
        consultation,
        "Consultation status updated",
    ))
}

/// PATCH /api/consultations/{id}/assign
pub async fn assign(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<SpecialistAssignment>,
) -> AppResult<ApiResponse<Consultation>> {
    let consultation = state
        .consultations
        .assign_specialist(&id, &payload.specialist_id, &payload.specialist_name)
        .await?;
    Ok(ApiResponse::ok_with_message(consultation, "Specialist assigned"))
}
