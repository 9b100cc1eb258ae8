//! 答案匹配
//!
//! 提交的答案按 question_key 与问卷题目匹配，匹配不上的答案直接跳过，不视为错误。

use std::collections::HashMap;

use serde_json::Value;

use crate::error::Result;

/// 待写入的答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAnswer {
    pub question_id: i64,
    pub question_key: String,
    /// 答案序列化后的 JSON 文本
    pub answer_text: String,
}

/// 匹配结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnswerPlan {
    /// 按 question_id 升序
    pub answers: Vec<PlannedAnswer>,
    /// 未匹配的题目键，升序
    pub skipped_keys: Vec<String>,
}

/// 将提交的答案与题目键映射匹配
pub fn plan_answers(
    question_ids: &HashMap<String, i64>,
    responses: &HashMap<String, Value>,
) -> Result<AnswerPlan> {
    let mut plan = AnswerPlan::default();

    for (key, answer) in responses {
        match question_ids.get(key) {
            Some(&question_id) => plan.answers.push(PlannedAnswer {
                question_id,
                question_key: key.clone(),
                answer_text: serde_json::to_string(answer)?,
            }),
            None => plan.skipped_keys.push(key.clone()),
        }
    }

    plan.answers.sort_by_key(|a| a.question_id);
    plan.skipped_keys.sort();

    Ok(plan)
}
