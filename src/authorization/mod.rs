pub mod resolver;
pub mod resource;
pub mod strategy;

pub use resolver::{AuthorizationResolver, StrategyRegistry};
pub use resource::{ResourceKind, ResourceTarget};
pub use strategy::{AnswerOptionOwnership, OwnershipStrategy, QuestionOwnership, QuizOwnership};
