//! 问卷奖励服务
//!
//! 提供问卷列表、题目查询和问卷提交 REST API。
//!
//! ## 核心功能
//!
//! - **问卷查询**：列出启用的问卷及题目数量，按展示顺序返回题目
//! - **问卷提交**：在单个事务内写入用户、答案并触发奖励，失败整体回滚
//! - **重复防护**：事务内预检查加完成记录唯一约束，拒绝重复完成
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `reward`: 奖励处理器
//! - `service`: 业务服务层
//! - `handlers` / `routes` / `middleware` / `state`: HTTP 接入层

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod reward;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{Result, SurveyError};
pub use models::*;
pub use repository::{
    CompletionRepository, ResponseRepository, SurveyRepository, SurveyRepositoryTrait,
    UserRepository,
};
pub use reward::{RewardProcessor, StoredProcedureReward};
pub use service::{SubmissionService, SurveyQueryService, dto};
pub use state::AppState;
