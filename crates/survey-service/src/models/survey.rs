//! 问卷与题目实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 问卷
///
/// 由运营在库中直接维护，本服务只读
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: i64,
    /// 业务键，奖励存储过程按此键识别问卷
    pub survey_key: String,
    pub title: String,
    #[sqlx(default)]
    pub description: Option<String>,
    /// 完成后奖励的积分
    pub reward_points: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 问卷列表项，附带题目数量
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub survey: Survey,
    pub question_count: i64,
}

/// 问卷题目
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub id: i64,
    pub survey_id: i64,
    /// 题目稳定键，提交答案时以此匹配
    pub question_key: String,
    pub question_text: String,
    /// 题型（text / single_choice / multi_choice 等），由前端解释
    pub question_type: String,
    /// 选项列表，JSON 原样透传
    #[sqlx(default)]
    pub options: Option<Value>,
    /// 展示顺序，升序
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}
