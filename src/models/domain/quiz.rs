use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ids::{PrincipalId, QuizId};

/// Top of the containment tree and the only entity carrying an owner.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: QuizId,
    pub owner_id: PrincipalId, // Set on create, never changes
    pub title: String,
    pub description: String,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(owner_id: PrincipalId, title: &str, description: &str, is_public: bool) -> Self {
        let now = Utc::now();
        Quiz {
            id: QuizId::generate(),
            owner_id,
            title: title.to_string(),
            description: description.to_string(),
            is_public,
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    /// Replaces the editable fields. The owner is not one of them.
    pub fn update(&mut self, title: &str, description: &str, is_public: bool) {
        self.title = title.to_string();
        self.description = description.to_string();
        self.is_public = is_public;
        self.modified_at = Some(Utc::now());
    }
}
