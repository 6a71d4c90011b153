//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::response)
//! - [`extract`] - 请求体/查询参数提取器, 解析失败统一转为校验错误
//! - 日志与输入校验

pub mod extract;
pub mod logger;
pub mod validation;

pub use extract::{JsonBody, QueryParams};
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use shared::response::ApiResponse;
