pub mod domain;
pub mod dto;
pub mod ids;

pub use ids::{AnswerOptionId, PrincipalId, QuestionId, QuizId, ResourceId};
