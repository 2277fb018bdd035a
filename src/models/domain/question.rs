use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ids::{QuestionId, QuizId};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub quiz_id: QuizId, // Parent quiz, ownership is inherited from it
    pub text: String,
    pub question_type: QuestionType,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuestionType {
    Identification,
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Identification,
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Identification => "Identification",
            QuestionType::MultipleChoice => "MultipleChoice",
            QuestionType::TrueFalse => "TrueFalse",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown question type '{}'", s))
    }
}

impl Question {
    pub fn new(
        quiz_id: QuizId,
        text: &str,
        question_type: QuestionType,
        correct_answer: &str,
    ) -> Self {
        let now = Utc::now();
        Question {
            id: QuestionId::generate(),
            quiz_id,
            text: text.to_string(),
            question_type,
            correct_answer: correct_answer.to_string(),
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn update(&mut self, text: &str, question_type: QuestionType, correct_answer: &str) {
        self.text = text.to_string();
        self.question_type = question_type;
        self.correct_answer = correct_answer.to_string();
        self.modified_at = Some(Utc::now());
    }
}
