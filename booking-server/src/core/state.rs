//! 服务器状态
//!
//! 所有字段都是廉价克隆的句柄 (SurrealDB 客户端内部是 Arc)。

use crate::core::Config;
use crate::db::DbService;
use crate::services::ConsultationService;
use crate::utils::AppResult;

#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub consultations: ConsultationService,
}

impl ServerState {
    /// Build state around an open database
    pub fn with_db(config: Config, db: DbService) -> Self {
        let consultations = ConsultationService::new(db.db.clone());
        Self {
            config,
            db,
            consultations,
        }
    }

    /// 连接数据库、应用索引并组装服务
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database).await?;
        Ok(Self::with_db(config.clone(), db))
    }
}
