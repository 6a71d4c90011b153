//! Consultation API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/consultations | POST | 创建咨询 (201) |
//! | /api/consultations | GET | 列表, 支持 status / assignedSpecialistId / eventType / budgetRange / dateFrom / dateTo |
//! | /api/consultations/stats | GET | 统计 |
//! | /api/consultations/customer/{customer_id} | GET | 客户的咨询 |
//! | /api/consultations/{id} | GET | 单个咨询 |
//! | /api/consultations/{id}/status | PATCH | 更新状态 |
//! | /api/consultations/{id}/assign | PATCH | 分配专员 |

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/consultations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // static segments win over `/{id}`
        .route("/stats", get(handler::stats))
        .route("/customer/{customer_id}", get(handler::list_by_customer))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/assign", patch(handler::assign))
}
