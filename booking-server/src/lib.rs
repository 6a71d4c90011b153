//! Booking Server - 餐厅活动预订咨询服务
//!
//! # 架构概述
//!
//! - **咨询** (`services`): 活动预订咨询的创建、查询、状态流转、专员分配和统计
//! - **数据库** (`db`): SurrealDB (mem / rocksdb / ws)
//! - **HTTP API** (`api`): RESTful 接口, 统一 `{success, message, error, data}` 响应
//! - **诊断** (`inspect`): `booking-inspect` 使用的数据查看工具
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、启动错误
//! ├── db/            # 连接、文档、仓储
//! ├── services/      # 业务规则
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── inspect/       # 诊断会话和命令
//! └── utils/         # 错误、提取器、校验、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inspect;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, DatabaseConfig, Server, ServerState};
pub use services::ConsultationService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 加载 .env 并初始化日志, 返回最终配置
pub fn setup_environment() -> Config {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
