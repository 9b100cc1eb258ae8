//! 问卷服务错误类型
//!
//! 定义服务层的业务错误和系统错误，并负责转换为 HTTP 响应

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 完成记录唯一约束名，与迁移脚本保持一致
pub const COMPLETION_UNIQUE_CONSTRAINT: &str = "uq_user_completed_surveys_user_survey";

/// 问卷服务错误类型
#[derive(Debug, Error)]
pub enum SurveyError {
    // === 业务错误 ===
    #[error("您已经完成过这份问卷")]
    AlreadyCompleted { survey_id: i64 },

    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("奖励处理失败: {0}")]
    RewardFailed(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 问卷服务 Result 类型别名
pub type Result<T> = std::result::Result<T, SurveyError>;

impl SurveyError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        matches!(self, Self::AlreadyCompleted { .. } | Self::Validation(_))
    }

    /// 是否为完成记录唯一约束冲突
    ///
    /// 并发提交时两个事务可能同时通过存在性检查，后提交者会在写入完成记录时触发此约束
    pub fn is_completion_conflict(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => {
                db_err.is_unique_violation()
                    && db_err.constraint() == Some(COMPLETION_UNIQUE_CONSTRAINT)
            }
            _ => false,
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyCompleted { .. } => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RewardFailed(_)
            | Self::Database(_)
            | Self::Serialization(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyCompleted { .. } => "SURVEY_ALREADY_COMPLETED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::RewardFailed(_) => "REWARD_PROCESSING_FAILED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for SurveyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Serialization(e) => {
                tracing::error!(error = %e, "JSON 处理失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::RewardFailed(e) => {
                tracing::error!(error = %e, "奖励处理失败");
                self.to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for SurveyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakeDbError;
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SurveyError::AlreadyCompleted { survey_id: 1 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SurveyError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SurveyError::RewardFailed("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SurveyError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_business_error_classification() {
        assert!(SurveyError::AlreadyCompleted { survey_id: 1 }.is_business_error());
        assert!(SurveyError::Validation("bad".into()).is_business_error());
        assert!(!SurveyError::RewardFailed("boom".into()).is_business_error());
        assert!(!SurveyError::Database(sqlx::Error::PoolTimedOut).is_business_error());
    }

    #[test]
    fn test_completion_conflict_detection() {
        let conflict = SurveyError::Database(FakeDbError::unique(COMPLETION_UNIQUE_CONSTRAINT));
        assert!(conflict.is_completion_conflict());

        // 其他唯一约束不是重复完成
        let email_conflict = SurveyError::Database(FakeDbError::unique("uq_users_email"));
        assert!(!email_conflict.is_completion_conflict());

        let raised = SurveyError::Database(FakeDbError::raised("survey s1 not found"));
        assert!(!raised.is_completion_conflict());

        assert!(!SurveyError::AlreadyCompleted { survey_id: 1 }.is_completion_conflict());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SurveyError::AlreadyCompleted { survey_id: 1 }.error_code(),
            "SURVEY_ALREADY_COMPLETED"
        );
        assert_eq!(
            SurveyError::RewardFailed("x".into()).error_code(),
            "REWARD_PROCESSING_FAILED"
        );
        assert_eq!(
            SurveyError::Internal("x".into()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_into_response_hides_database_details() {
        let response = SurveyError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = SurveyError::AlreadyCompleted { survey_id: 7 }.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
