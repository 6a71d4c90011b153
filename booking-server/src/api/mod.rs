//! HTTP API
//!
//! # 路由
//!
//! | 路径 | 说明 |
//! |------|------|
//! | /health, /health/detailed | 健康检查 |
//! | /api/consultations/... | 活动预订咨询 |

use axum::error_handling::HandleErrorLayer;
use axum::middleware as axum_middleware;
use axum::{BoxError, Router};
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::middleware::{self, logging::REQUEST_ID_HEADER};
use crate::utils::{AppError, ErrorCode};

pub mod consultations;
pub mod health;

/// UUIDv4 request id generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .nest("/api", Router::new().merge(consultations::router()))
        .merge(health::router())
        .fallback(route_not_found)
}

/// Build the application with middleware and state applied
///
/// Used by the HTTP server and by router-level tests
pub fn build_app(state: ServerState) -> Router {
    let request_timeout = state.config.request_timeout();

    build_router()
        // Timeout - elapsed requests get the standard error envelope
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // Request ID - echoed on the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, generated before logging sees the request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::with_message(ErrorCode::TimeoutError, "Request timed out")
    } else {
        AppError::internal(format!("Unhandled middleware error: {err}"))
    }
}

async fn route_not_found(uri: http::Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}
