pub mod answer_option_repository;
pub mod ownership_repository;
pub mod question_repository;
pub mod quiz_repository;

pub use answer_option_repository::{AnswerOptionRepository, MongoAnswerOptionRepository};
pub use ownership_repository::{MongoOwnershipRepository, OwnershipRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
