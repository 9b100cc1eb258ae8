//! 数据传输对象定义

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// 单次提交允许的最大答案数
pub const MAX_ANSWERS_PER_SUBMISSION: usize = 500;

/// 提交问卷请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyRequest {
    /// question_key -> 答案，答案可以是任意 JSON
    #[validate(length(max = 500, message = "单次提交的答案数量不能超过500"))]
    pub responses: HashMap<String, Value>,
    #[serde(default)]
    #[validate(length(max = 255, message = "邮箱长度不能超过255个字符"))]
    pub user_email: Option<String>,
}

impl SubmitSurveyRequest {
    pub fn into_command(self, survey_id: i64, client_ip: impl Into<String>) -> SubmitSurveyCommand {
        SubmitSurveyCommand {
            survey_id,
            responses: self.responses,
            user_email: self.user_email,
            client_ip: client_ip.into(),
        }
    }
}

/// 提交问卷命令（服务层输入）
#[derive(Debug, Clone)]
pub struct SubmitSurveyCommand {
    pub survey_id: i64,
    pub responses: HashMap<String, Value>,
    pub user_email: Option<String>,
    pub client_ip: String,
}

impl SubmitSurveyCommand {
    pub fn new(survey_id: i64, responses: HashMap<String, Value>, client_ip: impl Into<String>) -> Self {
        Self {
            survey_id,
            responses,
            user_email: None,
            client_ip: client_ip.into(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub user_id: i64,
    /// 写入的答案数
    pub saved_responses: usize,
    /// 因题目键不匹配而跳过的答案数
    pub skipped_responses: usize,
    /// 是否执行了奖励（问卷不存在时跳过）
    pub reward_applied: bool,
}

/// 提交问卷响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitSurveyResponse {
    pub fn completed() -> Self {
        Self {
            success: true,
            message: "问卷提交成功".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: SubmitSurveyRequest = serde_json::from_value(json!({
            "responses": { "q1": "yes", "q2": ["a", "b"] },
            "userEmail": "a@x.com"
        }))
        .unwrap();

        assert_eq!(request.responses.len(), 2);
        assert_eq!(request.user_email.as_deref(), Some("a@x.com"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_email_is_optional() {
        let request: SubmitSurveyRequest =
            serde_json::from_value(json!({ "responses": {} })).unwrap();
        assert!(request.user_email.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_overlong_email() {
        let request = SubmitSurveyRequest {
            responses: HashMap::new(),
            user_email: Some(format!("{}@x.com", "a".repeat(300))),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_rejects_too_many_answers() {
        let responses = (0..=MAX_ANSWERS_PER_SUBMISSION)
            .map(|i| (format!("q{i}"), json!(i)))
            .collect();
        let request = SubmitSurveyRequest {
            responses,
            user_email: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_command_carries_fields() {
        let request = SubmitSurveyRequest {
            responses: HashMap::from([("q1".to_string(), json!("yes"))]),
            user_email: Some("a@x.com".to_string()),
        };

        let command = request.into_command(7, "10.0.0.1");
        assert_eq!(command.survey_id, 7);
        assert_eq!(command.client_ip, "10.0.0.1");
        assert_eq!(command.user_email.as_deref(), Some("a@x.com"));
        assert_eq!(command.responses["q1"], json!("yes"));
    }

    #[test]
    fn test_completed_response_shape() {
        let value = serde_json::to_value(SubmitSurveyResponse::completed()).unwrap();
        assert_eq!(value["success"], true);
        assert!(value["message"].is_string());
    }
}
