//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;
use survey_shared::database::Database;

use crate::repository::SurveyRepository;
use crate::reward::{RewardProcessor, StoredProcedureReward};
use crate::service::{SubmissionService, SurveyQueryService};

/// Axum 应用共享状态
///
/// 服务通过 Arc 在 handler 间共享，连接池在此一次性注入
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub query_service: Arc<SurveyQueryService<SurveyRepository>>,
    pub submission_service: Arc<SubmissionService>,
    /// 是否从 X-Forwarded-For 读取客户端 IP
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// 使用存储过程奖励处理器创建应用状态
    pub fn new(pool: PgPool) -> Self {
        Self::with_reward_processor(pool, Arc::new(StoredProcedureReward))
    }

    pub fn with_reward_processor(pool: PgPool, reward_processor: Arc<dyn RewardProcessor>) -> Self {
        let survey_repo = Arc::new(SurveyRepository::new(pool.clone()));

        Self {
            db: Database::from_pool(pool.clone()),
            query_service: Arc::new(SurveyQueryService::new(survey_repo)),
            submission_service: Arc::new(SubmissionService::new(pool, reward_processor)),
            trust_forwarded_for: false,
        }
    }

    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}
