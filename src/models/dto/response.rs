use serde::Serialize;

use crate::models::domain::{AnswerOption, Question};

/// A question as it is read back together with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub answer_options: Vec<AnswerOption>,
}
