//! 问卷奖励处理
//!
//! 奖励在提交事务内执行，与答案写入同生共死：奖励失败时整个提交回滚。

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::debug;

use crate::error::{Result, SurveyError};

/// 奖励处理器 Trait
///
/// 实现方必须在传入的事务连接上完成全部写入（完成记录、积分变更），
/// 不得另开连接，否则无法随提交事务一起回滚。
///
/// # 示例
///
/// ```ignore
/// struct DoublePointsReward;
///
/// #[async_trait]
/// impl RewardProcessor for DoublePointsReward {
///     async fn apply_reward(&self, conn: &mut PgConnection, user_id: i64, survey_key: &str) -> Result<()> {
///         sqlx::query("SELECT process_survey_reward_x2($1, $2)")
///             .bind(user_id)
///             .bind(survey_key)
///             .execute(conn)
///             .await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait RewardProcessor: Send + Sync {
    /// 为用户完成问卷发放奖励
    ///
    /// 同一 (用户, 问卷) 重复完成时应触发完成记录唯一约束
    async fn apply_reward(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        survey_key: &str,
    ) -> Result<()>;
}

/// 基于数据库存储过程 `process_survey_reward` 的奖励处理器
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredProcedureReward;

#[async_trait]
impl RewardProcessor for StoredProcedureReward {
    async fn apply_reward(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        survey_key: &str,
    ) -> Result<()> {
        debug!(user_id, survey_key, "调用奖励存储过程");

        sqlx::query("SELECT process_survey_reward($1, $2)")
            .bind(user_id)
            .bind(survey_key)
            .execute(conn)
            .await?;

        Ok(())
    }
}

/// 将奖励处理器返回的错误归类为提交错误
///
/// - 完成记录唯一约束冲突视为重复提交
/// - 其余数据库错误（存储过程抛出的异常等）视为奖励失败
/// - 业务错误原样返回
pub fn classify_reward_error(err: SurveyError, survey_id: i64) -> SurveyError {
    if err.is_completion_conflict() {
        return SurveyError::AlreadyCompleted { survey_id };
    }

    match err {
        SurveyError::Database(db_err) => {
            let message = db_err
                .as_database_error()
                .map(|e| e.message().to_string())
                .unwrap_or_else(|| db_err.to_string());
            SurveyError::RewardFailed(message)
        }
        other => other,
    }
}
