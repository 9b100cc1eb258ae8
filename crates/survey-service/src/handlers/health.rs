//! 健康检查处理器

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::error;

use crate::state::AppState;

/// 数据库健康检查
///
/// GET /api/health，执行 `SELECT NOW()` 并返回数据库时间
pub async fn api_health(State(state): State<AppState>) -> Response {
    match state.db.now().await {
        Ok(time) => Json(json!({
            "status": "ok",
            "database": "connected",
            "time": time,
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "数据库健康检查失败");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "code": e.code(),
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// 存活探针：服务进程正常即返回 ok
pub async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "survey-service"
    }))
}
