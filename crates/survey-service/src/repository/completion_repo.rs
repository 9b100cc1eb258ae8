//! 问卷完成记录仓储
//!
//! 完成记录由奖励存储过程写入，这里只负责事务内的存在性检查

use sqlx::PgConnection;

use crate::error::Result;

pub struct CompletionRepository;

impl CompletionRepository {
    /// 在事务中检查是否已完成
    pub async fn exists_in_tx(tx: &mut PgConnection, user_id: i64, survey_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_completed_surveys
                WHERE user_id = $1 AND survey_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(survey_id)
        .fetch_one(tx)
        .await?;

        Ok(exists)
    }
}
