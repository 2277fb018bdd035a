use serde::{Deserialize, Serialize};

use crate::models::ids::{AnswerOptionId, QuestionId};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOption {
    pub id: AnswerOptionId,
    pub question_id: QuestionId,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(question_id: QuestionId, text: &str, is_correct: bool) -> Self {
        AnswerOption {
            id: AnswerOptionId::generate(),
            question_id,
            text: text.to_string(),
            is_correct,
        }
    }
}
