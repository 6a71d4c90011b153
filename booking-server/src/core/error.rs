//! 服务器启动/运行错误
//!
//! Request-level failures use `AppError`; this type only covers the
//! serve lifecycle (address, bind, serve loop).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("无效的监听地址: {0}")]
    InvalidAddress(String),

    #[error("端口绑定失败: {0}")]
    Bind(#[source] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
