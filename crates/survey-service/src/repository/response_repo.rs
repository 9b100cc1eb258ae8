//! 问卷答案仓储

use sqlx::{PgConnection, PgPool};

use crate::error::Result;
use crate::models::SurveyResponse;

pub struct ResponseRepository {
    pool: PgPool,
}

impl ResponseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出用户在某问卷下的全部答案
    pub async fn list_by_user_survey(
        &self,
        user_id: i64,
        survey_id: i64,
    ) -> Result<Vec<SurveyResponse>> {
        let responses = sqlx::query_as::<_, SurveyResponse>(
            r#"
            SELECT id, user_id, survey_id, question_id, answer_text, created_at
            FROM user_survey_responses
            WHERE user_id = $1 AND survey_id = $2
            ORDER BY question_id, id
            "#,
        )
        .bind(user_id)
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(responses)
    }

    /// 在事务中写入一条答案，返回记录 ID
    pub async fn create_in_tx(
        tx: &mut PgConnection,
        user_id: i64,
        survey_id: i64,
        question_id: i64,
        answer_text: &str,
    ) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO user_survey_responses (user_id, survey_id, question_id, answer_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(survey_id)
        .bind(question_id)
        .bind(answer_text)
        .fetch_one(tx)
        .await?;

        Ok(id)
    }
}
