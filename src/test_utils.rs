use std::sync::Arc;

use crate::{
    authorization::AuthorizationResolver, pipeline::RequestPipeline,
    repositories::ownership_repository::MockOwnershipRepository,
};

/// Pipeline whose ownership answers come from the given mock.
pub fn pipeline_over(ownership: MockOwnershipRepository) -> Arc<RequestPipeline> {
    let resolver = AuthorizationResolver::from_repository(Arc::new(ownership))
        .expect("all ownership strategies are registered");
    Arc::new(RequestPipeline::new(Arc::new(resolver)))
}

pub mod fixtures {
    use crate::models::{
        domain::{AnswerOption, Question, QuestionType, Quiz},
        ids::{PrincipalId, QuestionId, QuizId},
    };

    pub fn quiz_owned_by(owner: PrincipalId) -> Quiz {
        Quiz::new(owner, "Rust basics", "Ownership and borrowing", false)
    }

    pub fn question_in(quiz_id: QuizId) -> Question {
        Question::new(
            quiz_id,
            "What does the borrow checker enforce?",
            QuestionType::Identification,
            "aliasing rules",
        )
    }

    pub fn option_for(question_id: QuestionId, text: &str) -> AnswerOption {
        AnswerOption::new(question_id, text, false)
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::ids::{PrincipalId, QuizId};

    #[test]
    fn test_fixtures_link_parents() {
        let owner = PrincipalId::generate();
        let quiz = quiz_owned_by(owner);
        let question = question_in(quiz.id);
        let option = option_for(question.id, "lifetimes");

        assert_eq!(quiz.owner_id, owner);
        assert_eq!(question.quiz_id, quiz.id);
        assert_eq!(option.question_id, question.id);
    }

    #[test]
    fn test_fixtures_generate_distinct_ids() {
        let quiz_id = QuizId::generate();
        assert_ne!(question_in(quiz_id).id, question_in(quiz_id).id);
    }
}
