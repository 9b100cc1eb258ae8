//! 数据库仓储层
//!
//! 封装问卷相关表的 SQL 操作。事务控制由服务层决定，
//! 需要参与事务的操作以 `*_in_tx` 形式接收 `&mut PgConnection`。

mod completion_repo;
mod response_repo;
mod survey_repo;
mod traits;
mod user_repo;

pub use completion_repo::CompletionRepository;
pub use response_repo::ResponseRepository;
pub use survey_repo::SurveyRepository;
pub use traits::*;
pub use user_repo::UserRepository;
