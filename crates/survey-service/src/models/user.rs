//! 用户与答案实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 匿名提交时占位邮箱的域名
const PLACEHOLDER_EMAIL_DOMAIN: &str = "temp.com";

/// 用户
///
/// 首次提交问卷时按邮箱懒创建
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[sqlx(default)]
    pub ip_address: Option<String>,
    pub referral_code: String,
    /// 累计积分，由奖励存储过程维护
    pub points: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待写入的用户身份
///
/// 邮箱冲突时只更新 IP，推荐码仅对新用户生效
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub ip_address: String,
    pub referral_code: String,
}

impl NewUser {
    /// 根据提交信息解析身份
    ///
    /// 邮箱去除首尾空白，空串视为未提供并生成占位邮箱
    pub fn resolve(email: Option<&str>, ip_address: &str, now: DateTime<Utc>) -> Self {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
            .unwrap_or_else(placeholder_email);

        Self {
            email,
            ip_address: ip_address.to_string(),
            referral_code: referral_code_at(now),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        is_placeholder_email(&self.email)
    }
}

/// 生成匿名提交的占位邮箱，每次调用唯一
pub fn placeholder_email() -> String {
    format!("temp_{}@{}", Uuid::new_v4().simple(), PLACEHOLDER_EMAIL_DOMAIN)
}

pub fn is_placeholder_email(email: &str) -> bool {
    email.starts_with("temp_") && email.ends_with(&format!("@{PLACEHOLDER_EMAIL_DOMAIN}"))
}

/// 按时间生成推荐码
///
/// 同一毫秒内的并发新用户可能拿到相同推荐码，库中未对推荐码做唯一约束
pub fn referral_code_at(now: DateTime<Utc>) -> String {
    format!("IP{}", now.timestamp_millis())
}

/// 单题答案
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: i64,
    pub user_id: i64,
    pub survey_id: i64,
    pub question_id: i64,
    /// 答案的 JSON 文本
    pub answer_text: String,
    pub created_at: DateTime<Utc>,
}

impl SurveyResponse {
    /// 还原提交时的答案值
    pub fn answer(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.answer_text)
    }
}
