//! 仓储 Trait 定义
//!
//! 查询服务依赖抽象而非具体实现，便于 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{SurveyQuestion, SurveySummary};

/// 问卷仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyRepositoryTrait: Send + Sync {
    async fn list_active_surveys(&self) -> Result<Vec<SurveySummary>>;
    async fn list_questions(&self, survey_id: i64) -> Result<Vec<SurveyQuestion>>;
}
