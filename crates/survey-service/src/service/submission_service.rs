//! 问卷提交服务
//!
//! 一次提交在单个事务内完成：
//!
//! 1. 按邮箱写入用户 -> 2. 重复完成检查 -> 3. 匹配并写入答案
//!    -> 4. 调用奖励处理器 -> 5. 提交事务
//!
//! 任一步骤失败都会回滚整个事务，外部不会观察到部分写入。

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument, warn};

use survey_shared::observability::metrics;

use crate::error::{Result, SurveyError};
use crate::models::NewUser;
use crate::repository::{
    CompletionRepository, ResponseRepository, SurveyRepository, UserRepository,
};
use crate::reward::{RewardProcessor, classify_reward_error};
use crate::service::answers::plan_answers;
use crate::service::dto::{SubmissionOutcome, SubmitSurveyCommand};

/// 问卷提交服务
///
/// 连接池在构造时注入，每次提交独占一个连接直到事务结束。
pub struct SubmissionService {
    pool: PgPool,
    reward_processor: Arc<dyn RewardProcessor>,
}

impl SubmissionService {
    pub fn new(pool: PgPool, reward_processor: Arc<dyn RewardProcessor>) -> Self {
        Self {
            pool,
            reward_processor,
        }
    }

    /// 提交问卷答案
    #[instrument(
        skip(self, command),
        fields(survey_id = command.survey_id, answer_count = command.responses.len())
    )]
    pub async fn submit(&self, command: SubmitSurveyCommand) -> Result<SubmissionOutcome> {
        let start = Instant::now();
        let result = self.run_in_transaction(&command).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(outcome) => {
                metrics::record_survey_submission(command.survey_id, "success", elapsed);
                metrics::record_survey_responses(
                    command.survey_id,
                    outcome.saved_responses as u64,
                    outcome.skipped_responses as u64,
                );
                info!(
                    user_id = outcome.user_id,
                    saved = outcome.saved_responses,
                    skipped = outcome.skipped_responses,
                    reward_applied = outcome.reward_applied,
                    "问卷提交成功"
                );
            }
            Err(SurveyError::AlreadyCompleted { .. }) => {
                metrics::record_survey_submission(command.survey_id, "duplicate", elapsed);
                info!("问卷已完成，拒绝重复提交");
            }
            Err(e) => {
                metrics::record_survey_submission(command.survey_id, "failed", elapsed);
                warn!(error = %e, "问卷提交失败");
            }
        }

        result
    }

    /// 开启事务执行提交，成功则提交，失败显式回滚
    async fn run_in_transaction(&self, command: &SubmitSurveyCommand) -> Result<SubmissionOutcome> {
        let mut tx = self.pool.begin().await?;

        match self.execute_submission(&mut tx, command).await {
            Ok(outcome) => {
                tx.commit().await?;
                Ok(outcome)
            }
            Err(e) => {
                // 回滚失败只记录日志，返回原始错误
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "事务回滚失败");
                }
                Err(e)
            }
        }
    }

    async fn execute_submission(
        &self,
        conn: &mut PgConnection,
        command: &SubmitSurveyCommand,
    ) -> Result<SubmissionOutcome> {
        let survey_id = command.survey_id;

        // 1. 身份解析
        let new_user = NewUser::resolve(
            command.user_email.as_deref(),
            &command.client_ip,
            Utc::now(),
        );
        let user_id = UserRepository::upsert_by_email_in_tx(conn, &new_user).await?;

        // 2. 重复完成检查
        if CompletionRepository::exists_in_tx(conn, user_id, survey_id).await? {
            return Err(SurveyError::AlreadyCompleted { survey_id });
        }

        // 3. 写入答案
        let question_ids = SurveyRepository::question_ids_in_tx(conn, survey_id).await?;
        let plan = plan_answers(&question_ids, &command.responses)?;
        for answer in &plan.answers {
            ResponseRepository::create_in_tx(
                conn,
                user_id,
                survey_id,
                answer.question_id,
                &answer.answer_text,
            )
            .await?;
        }
        if !plan.skipped_keys.is_empty() {
            info!(skipped_keys = ?plan.skipped_keys, "部分答案未匹配到题目，已跳过");
        }

        // 4. 奖励
        let reward_applied = match SurveyRepository::get_survey_key_in_tx(conn, survey_id).await? {
            Some(survey_key) => {
                self.reward_processor
                    .apply_reward(conn, user_id, &survey_key)
                    .await
                    .map_err(|e| classify_reward_error(e, survey_id))?;
                true
            }
            None => {
                warn!(survey_id, "问卷不存在，跳过奖励处理");
                false
            }
        };

        Ok(SubmissionOutcome {
            user_id,
            saved_responses: plan.answers.len(),
            skipped_responses: plan.skipped_keys.len(),
            reward_applied,
        })
    }
}
