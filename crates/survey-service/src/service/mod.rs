//! 服务层
//!
//! ## 模块结构
//!
//! - `dto`: 数据传输对象定义
//! - `answers`: 答案与题目的匹配规则
//! - `query_service`: 问卷查询服务（只读操作）
//! - `submission_service`: 问卷提交服务（事务写入）

pub mod answers;
pub mod dto;
pub mod query_service;
pub mod submission_service;

pub use dto::*;
pub use query_service::SurveyQueryService;
pub use submission_service::SubmissionService;
