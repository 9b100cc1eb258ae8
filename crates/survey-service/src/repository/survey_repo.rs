//! 问卷仓储
//!
//! 问卷与题目均为只读数据

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::SurveyRepositoryTrait;
use crate::error::Result;
use crate::models::{SurveyQuestion, SurveySummary};

pub struct SurveyRepository {
    pool: PgPool,
}

impl SurveyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出所有启用的问卷及其题目数量，按 ID 升序
    pub async fn list_active_surveys(&self) -> Result<Vec<SurveySummary>> {
        let surveys = sqlx::query_as::<_, SurveySummary>(
            r#"
            SELECT s.id, s.survey_key, s.title, s.description, s.reward_points,
                   s.is_active, s.created_at,
                   (SELECT COUNT(*) FROM survey_questions q WHERE q.survey_id = s.id) AS question_count
            FROM surveys s
            WHERE s.is_active = TRUE
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(surveys)
    }

    /// 列出问卷的所有题目，按展示顺序排列
    ///
    /// 问卷不存在时返回空列表
    pub async fn list_questions(&self, survey_id: i64) -> Result<Vec<SurveyQuestion>> {
        let questions = sqlx::query_as::<_, SurveyQuestion>(
            r#"
            SELECT id, survey_id, question_key, question_text, question_type,
                   options, order_index, created_at
            FROM survey_questions
            WHERE survey_id = $1
            ORDER BY order_index, id
            "#,
        )
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    // ==================== 事务操作 ====================

    /// 在事务中加载问卷的 question_key -> question_id 映射
    pub async fn question_ids_in_tx(
        tx: &mut PgConnection,
        survey_id: i64,
    ) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT question_key, id
            FROM survey_questions
            WHERE survey_id = $1
            "#,
        )
        .bind(survey_id)
        .fetch_all(tx)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// 在事务中查询问卷业务键
    pub async fn get_survey_key_in_tx(
        tx: &mut PgConnection,
        survey_id: i64,
    ) -> Result<Option<String>> {
        let key = sqlx::query_scalar::<_, String>("SELECT survey_key FROM surveys WHERE id = $1")
            .bind(survey_id)
            .fetch_optional(tx)
            .await?;

        Ok(key)
    }
}

#[async_trait]
impl SurveyRepositoryTrait for SurveyRepository {
    async fn list_active_surveys(&self) -> Result<Vec<SurveySummary>> {
        self.list_active_surveys().await
    }

    async fn list_questions(&self, survey_id: i64) -> Result<Vec<SurveyQuestion>> {
        self.list_questions(survey_id).await
    }
}
