use std::fmt;

use crate::models::ids::{AnswerOptionId, QuestionId, QuizId, ResourceId};

/// The tiers of the containment tree, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Quiz,
    Question,
    AnswerOption,
}

impl ResourceKind {
    pub const COUNT: usize = 3;
    pub const ALL: [ResourceKind; Self::COUNT] = [
        ResourceKind::Quiz,
        ResourceKind::Question,
        ResourceKind::AnswerOption,
    ];

    /// Position in the resolver's strategy table. Matches the order of [`Self::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            ResourceKind::Quiz => 0,
            ResourceKind::Question => 1,
            ResourceKind::AnswerOption => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Quiz => "quiz",
            ResourceKind::Question => "question",
            ResourceKind::AnswerOption => "answer option",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource a request wants to modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceTarget {
    kind: ResourceKind,
    id: ResourceId,
}

impl ResourceTarget {
    pub fn quiz(id: QuizId) -> Self {
        Self {
            kind: ResourceKind::Quiz,
            id: id.into(),
        }
    }

    pub fn question(id: QuestionId) -> Self {
        Self {
            kind: ResourceKind::Question,
            id: id.into(),
        }
    }

    pub fn answer_option(id: AnswerOptionId) -> Self {
        Self {
            kind: ResourceKind::AnswerOption,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }
}

impl fmt::Display for ResourceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
