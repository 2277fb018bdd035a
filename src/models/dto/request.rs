use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{
    domain::QuestionType,
    ids::{AnswerOptionId, PrincipalId, QuestionId, QuizId},
};

/// Rejects the all-zero identifier a client sends when it forgot to fill one in.
pub fn not_nil<T: AsRef<Uuid>>(id: &T) -> Result<(), ValidationError> {
    if id.as_ref().is_nil() {
        return Err(ValidationError::new("nil_id").with_message("identifier is required".into()));
    }
    Ok(())
}

fn known_question_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<QuestionType>().map(|_| ()).map_err(|_| {
        ValidationError::new("question_type").with_message(
            "type must be one of Identification, MultipleChoice, TrueFalse".into(),
        )
    })
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters."))]
    pub title: String,

    #[validate(length(min = 1, max = 1000, message = "Description must be 1 to 1000 characters."))]
    pub description: String,

    pub is_public: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(custom(function = "not_nil"))]
    pub quiz_id: QuizId,

    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters."))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: String,

    pub is_public: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteQuizRequest {
    #[validate(custom(function = "not_nil"))]
    pub quiz_id: QuizId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetQuizRequest {
    #[validate(custom(function = "not_nil"))]
    pub quiz_id: QuizId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListUserQuizzesRequest {
    #[validate(custom(function = "not_nil"))]
    pub owner_id: PrincipalId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerOptionInput {
    #[validate(length(min = 1, message = "Answer option text is required."))]
    pub text: String,

    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(custom(function = "not_nil"))]
    pub quiz_id: QuizId,

    #[validate(length(min = 1, message = "Question text is required."))]
    pub text: String,

    #[validate(custom(function = "known_question_type"))]
    pub question_type: String,

    #[validate(length(min = 1, message = "Correct answer is required."))]
    pub correct_answer: String,

    #[validate(nested)]
    #[serde(default)]
    pub answer_options: Vec<AnswerOptionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(custom(function = "not_nil"))]
    pub question_id: QuestionId,

    #[validate(length(min = 1, message = "Question text is required."))]
    pub text: String,

    #[validate(custom(function = "known_question_type"))]
    pub question_type: String,

    #[validate(length(min = 1, message = "Correct answer is required."))]
    pub correct_answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteQuestionRequest {
    #[validate(custom(function = "not_nil"))]
    pub question_id: QuestionId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListQuizQuestionsRequest {
    #[validate(custom(function = "not_nil"))]
    pub quiz_id: QuizId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddAnswerOptionRequest {
    #[validate(custom(function = "not_nil"))]
    pub question_id: QuestionId,

    #[validate(length(min = 1, message = "Answer option text is required."))]
    pub text: String,

    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteAnswerOptionRequest {
    #[validate(custom(function = "not_nil"))]
    pub answer_option_id: AnswerOptionId,
}
