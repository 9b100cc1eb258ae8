//! 问卷服务领域模型
//!
//! 问卷、题目为只读输入；用户、答案由提交流程写入，完成记录由奖励存储过程写入

pub mod survey;
pub mod user;

pub use survey::{Survey, SurveyQuestion, SurveySummary};
pub use user::{NewUser, SurveyResponse, User};
