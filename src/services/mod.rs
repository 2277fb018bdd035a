pub mod answer_option_service;
pub mod question_service;
pub mod quiz_service;

pub use answer_option_service::AnswerOptionService;
pub use question_service::QuestionService;
pub use quiz_service::QuizService;
