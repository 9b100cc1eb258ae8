//! 问卷 API 处理器

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Path, State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::instrument;
use validator::Validate;

use crate::error::{Result, SurveyError};
use crate::middleware::client_ip;
use crate::models::{SurveyQuestion, SurveySummary};
use crate::service::dto::{SubmitSurveyRequest, SubmitSurveyResponse};
use crate::state::AppState;

/// 获取启用的问卷列表
///
/// GET /api/surveys
pub async fn list_surveys(State(state): State<AppState>) -> Result<Json<Vec<SurveySummary>>> {
    let surveys = state.query_service.list_active_surveys().await?;
    Ok(Json(surveys))
}

/// 获取问卷题目
///
/// GET /api/surveys/{id}/questions
pub async fn list_questions(
    State(state): State<AppState>,
    Path(survey_id): Path<i64>,
) -> Result<Json<Vec<SurveyQuestion>>> {
    let questions = state.query_service.list_questions(survey_id).await?;
    Ok(Json(questions))
}

/// 提交问卷答案
///
/// POST /api/surveys/{id}/submit
///
/// 请求体解析失败同样按校验错误返回 JSON 错误体
#[instrument(skip(state, headers, payload))]
pub async fn submit_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<i64>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: std::result::Result<Json<SubmitSurveyRequest>, JsonRejection>,
) -> Result<Json<SubmitSurveyResponse>> {
    let Json(req) = payload.map_err(|rejection| SurveyError::Validation(rejection.body_text()))?;
    req.validate()?;

    let ip = client_ip(&headers, peer, state.trust_forwarded_for);
    let command = req.into_command(survey_id, ip);
    state.submission_service.submit(command).await?;

    Ok(Json(SubmitSurveyResponse::completed()))
}
