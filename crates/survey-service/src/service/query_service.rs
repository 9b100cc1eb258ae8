//! 问卷查询服务
//!
//! 提供问卷列表与题目列表的只读查询

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::{SurveyQuestion, SurveySummary};
use crate::repository::SurveyRepositoryTrait;

pub struct SurveyQueryService<SR>
where
    SR: SurveyRepositoryTrait,
{
    survey_repo: Arc<SR>,
}

impl<SR> SurveyQueryService<SR>
where
    SR: SurveyRepositoryTrait,
{
    pub fn new(survey_repo: Arc<SR>) -> Self {
        Self { survey_repo }
    }

    /// 列出所有启用的问卷，按 ID 升序
    #[instrument(skip(self))]
    pub async fn list_active_surveys(&self) -> Result<Vec<SurveySummary>> {
        let mut surveys = self.survey_repo.list_active_surveys().await?;
        surveys.retain(|s| s.survey.is_active);
        surveys.sort_by_key(|s| s.survey.id);

        debug!(count = surveys.len(), "查询启用问卷");
        Ok(surveys)
    }

    /// 列出问卷题目，按 order_index 升序，相同时按 ID
    ///
    /// 问卷不存在与问卷没有题目都返回空列表
    #[instrument(skip(self))]
    pub async fn list_questions(&self, survey_id: i64) -> Result<Vec<SurveyQuestion>> {
        let mut questions = self.survey_repo.list_questions(survey_id).await?;
        questions.sort_by_key(|q| (q.order_index, q.id));

        debug!(survey_id, count = questions.len(), "查询问卷题目");
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurveyError;
    use crate::models::Survey;
    use crate::repository::MockSurveyRepositoryTrait;
    use chrono::Utc;

    fn question(id: i64, order_index: i32) -> SurveyQuestion {
        SurveyQuestion {
            id,
            survey_id: 1,
            question_key: format!("q{id}"),
            question_text: format!("问题 {id}"),
            question_type: "text".to_string(),
            options: None,
            order_index,
            created_at: Utc::now(),
        }
    }

    fn summary(id: i64, is_active: bool, question_count: i64) -> SurveySummary {
        SurveySummary {
            survey: Survey {
                id,
                survey_key: format!("survey-{id}"),
                title: format!("问卷 {id}"),
                description: None,
                reward_points: 10,
                is_active,
                created_at: Utc::now(),
            },
            question_count,
        }
    }

    #[tokio::test]
    async fn test_list_questions_ordered_by_order_index() {
        let mut repo = MockSurveyRepositoryTrait::new();
        repo.expect_list_questions()
            .withf(|id| *id == 1)
            .returning(|_| Ok(vec![question(3, 2), question(1, 0), question(2, 1)]));

        let service = SurveyQueryService::new(Arc::new(repo));
        let questions = service.list_questions(1).await.unwrap();

        let orders: Vec<i32> = questions.iter().map(|q| q.order_index).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_list_questions_ties_broken_by_id() {
        let mut repo = MockSurveyRepositoryTrait::new();
        repo.expect_list_questions()
            .returning(|_| Ok(vec![question(9, 1), question(4, 1), question(7, 0)]));

        let service = SurveyQueryService::new(Arc::new(repo));
        let ids: Vec<i64> = service
            .list_questions(1)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();

        assert_eq!(ids, vec![7, 4, 9]);
    }

    #[tokio::test]
    async fn test_list_questions_unknown_survey_is_empty() {
        let mut repo = MockSurveyRepositoryTrait::new();
        repo.expect_list_questions().returning(|_| Ok(vec![]));

        let service = SurveyQueryService::new(Arc::new(repo));
        assert!(service.list_questions(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_active_surveys_sorted_and_filtered() {
        let mut repo = MockSurveyRepositoryTrait::new();
        repo.expect_list_active_surveys().returning(|| {
            Ok(vec![
                summary(5, true, 2),
                summary(2, true, 0),
                summary(3, false, 4),
            ])
        });

        let service = SurveyQueryService::new(Arc::new(repo));
        let surveys = service.list_active_surveys().await.unwrap();

        let ids: Vec<i64> = surveys.iter().map(|s| s.survey.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(surveys[1].question_count, 2);
    }

    #[tokio::test]
    async fn test_list_active_surveys_propagates_store_error() {
        let mut repo = MockSurveyRepositoryTrait::new();
        repo.expect_list_active_surveys()
            .returning(|| Err(SurveyError::Database(sqlx::Error::PoolTimedOut)));

        let service = SurveyQueryService::new(Arc::new(repo));
        let err = service.list_active_surveys().await.unwrap_err();
        assert!(matches!(err, SurveyError::Database(_)));
    }
}
