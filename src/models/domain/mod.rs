pub mod answer_option;
pub mod question;
pub mod quiz;

pub use answer_option::AnswerOption;
pub use question::{Question, QuestionType};
pub use quiz::Quiz;
