#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use simple_quiz_server::{
    authorization::{
        AnswerOptionOwnership, AuthorizationResolver, OwnershipStrategy, QuestionOwnership,
        QuizOwnership, ResourceKind, StrategyRegistry,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOption, Question, Quiz},
        ids::{AnswerOptionId, PrincipalId, QuestionId, QuizId, ResourceId},
    },
    pipeline::RequestPipeline,
    repositories::{AnswerOptionRepository, OwnershipRepository, QuestionRepository, QuizRepository},
    services::{AnswerOptionService, QuestionService, QuizService},
};

#[derive(Default)]
struct Tables {
    quizzes: HashMap<QuizId, Quiz>,
    questions: HashMap<QuestionId, Question>,
    answer_options: HashMap<AnswerOptionId, AnswerOption>,
}

/// Quizzes, questions and answer options in memory, with the same join and
/// cascade behaviour as the Mongo repositories.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
    failing_option_writes: AtomicBool,
    drop_option_after_read: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every following call fails with a database error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Only answer option inserts fail, everything else keeps working.
    pub fn set_failing_option_writes(&self, failing: bool) {
        self.failing_option_writes.store(failing, Ordering::SeqCst);
    }

    /// The next answer option read removes the row it returns, as if a
    /// concurrent request deleted it right after.
    pub fn drop_option_after_next_read(&self) {
        self.drop_option_after_read.store(true, Ordering::SeqCst);
    }

    fn check_option_write(&self) -> AppResult<()> {
        self.check()?;
        if self.failing_option_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("write failed".to_string()));
        }
        Ok(())
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("store unavailable".to_string()));
        }
        Ok(())
    }

    pub async fn insert_quiz(&self, quiz: Quiz) {
        self.tables.write().await.quizzes.insert(quiz.id, quiz);
    }

    pub async fn insert_question(&self, question: Question) {
        self.tables.write().await.questions.insert(question.id, question);
    }

    pub async fn insert_answer_option(&self, option: AnswerOption) {
        self.tables
            .write()
            .await
            .answer_options
            .insert(option.id, option);
    }

    /// Moves a quiz to another owner behind the services' back.
    pub async fn reassign_owner(&self, quiz_id: QuizId, owner: PrincipalId) {
        if let Some(quiz) = self.tables.write().await.quizzes.get_mut(&quiz_id) {
            quiz.owner_id = owner;
        }
    }

    pub async fn question_count(&self) -> usize {
        self.tables.read().await.questions.len()
    }

    pub async fn answer_option_count(&self) -> usize {
        self.tables.read().await.answer_options.len()
    }
}

#[async_trait]
impl QuizRepository for InMemoryStore {
    async fn find_by_id(&self, id: QuizId) -> AppResult<Option<Quiz>> {
        self.check()?;
        Ok(self.tables.read().await.quizzes.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: PrincipalId) -> AppResult<Vec<Quiz>> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut quizzes: Vec<Quiz> = tables
            .quizzes
            .values()
            .filter(|q| q.owner_id == owner_id)
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(quizzes)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.check()?;
        self.tables.write().await.quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.check()?;
        let mut tables = self.tables.write().await;
        match tables.quizzes.get_mut(&quiz.id) {
            Some(existing) => {
                *existing = quiz.clone();
                Ok(quiz)
            }
            None => Err(AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id))),
        }
    }

    async fn delete(&self, id: QuizId) -> AppResult<()> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.quizzes.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        let question_ids: Vec<QuestionId> = tables
            .questions
            .values()
            .filter(|q| q.quiz_id == id)
            .map(|q| q.id)
            .collect();
        tables
            .answer_options
            .retain(|_, o| !question_ids.contains(&o.question_id));
        tables.questions.retain(|_, q| q.quiz_id != id);
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn find_by_id(&self, id: QuestionId) -> AppResult<Option<Question>> {
        self.check()?;
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn list_by_quiz(&self, quiz_id: QuizId) -> AppResult<Vec<Question>> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(questions)
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.check()?;
        self.tables
            .write()
            .await
            .questions
            .insert(question.id, question.clone());
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        self.check()?;
        let mut tables = self.tables.write().await;
        match tables.questions.get_mut(&question.id) {
            Some(existing) => {
                *existing = question.clone();
                Ok(question)
            }
            None => Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            ))),
        }
    }

    async fn delete(&self, id: QuestionId) -> AppResult<()> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.answer_options.retain(|_, o| o.question_id != id);
        match tables.questions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Question with id '{}' not found", id))),
        }
    }
}

#[async_trait]
impl AnswerOptionRepository for InMemoryStore {
    async fn find_by_id(&self, id: AnswerOptionId) -> AppResult<Option<AnswerOption>> {
        self.check()?;
        if self.drop_option_after_read.swap(false, Ordering::SeqCst) {
            return Ok(self.tables.write().await.answer_options.remove(&id));
        }
        Ok(self.tables.read().await.answer_options.get(&id).cloned())
    }

    async fn list_by_questions(&self, question_ids: Vec<QuestionId>) -> AppResult<Vec<AnswerOption>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .answer_options
            .values()
            .filter(|o| question_ids.contains(&o.question_id))
            .cloned()
            .collect())
    }

    async fn create(&self, option: AnswerOption) -> AppResult<AnswerOption> {
        self.check_option_write()?;
        self.tables
            .write()
            .await
            .answer_options
            .insert(option.id, option.clone());
        Ok(option)
    }

    async fn create_many(&self, options: Vec<AnswerOption>) -> AppResult<Vec<AnswerOption>> {
        self.check_option_write()?;
        let mut tables = self.tables.write().await;
        for option in &options {
            tables.answer_options.insert(option.id, option.clone());
        }
        Ok(options)
    }

    async fn delete(&self, id: AnswerOptionId) -> AppResult<()> {
        self.check()?;
        match self.tables.write().await.answer_options.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Answer option with id '{}' not found",
                id
            ))),
        }
    }
}

#[async_trait]
impl OwnershipRepository for InMemoryStore {
    async fn owns_quiz(&self, principal: PrincipalId, quiz_id: QuizId) -> AppResult<bool> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .quizzes
            .get(&quiz_id)
            .is_some_and(|quiz| quiz.owner_id == principal))
    }

    async fn owns_question(&self, principal: PrincipalId, question_id: QuestionId) -> AppResult<bool> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .get(&question_id)
            .and_then(|question| tables.quizzes.get(&question.quiz_id))
            .is_some_and(|quiz| quiz.owner_id == principal))
    }

    async fn owns_answer_option(
        &self,
        principal: PrincipalId,
        answer_option_id: AnswerOptionId,
    ) -> AppResult<bool> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .answer_options
            .get(&answer_option_id)
            .and_then(|option| tables.questions.get(&option.question_id))
            .and_then(|question| tables.quizzes.get(&question.quiz_id))
            .is_some_and(|quiz| quiz.owner_id == principal))
    }
}

/// Wraps a strategy and counts how often it is consulted.
pub struct CountingStrategy {
    inner: Arc<dyn OwnershipStrategy>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl OwnershipStrategy for CountingStrategy {
    async fn is_owner(&self, resource_id: ResourceId, principal: PrincipalId) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.is_owner(resource_id, principal).await
    }
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub resolver: Arc<AuthorizationResolver>,
    pub quizzes: QuizService,
    pub questions: QuestionService,
    pub answer_options: AnswerOptionService,
    strategy_calls: Arc<AtomicUsize>,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let ownership: Arc<dyn OwnershipRepository> = store.clone();
        let strategy_calls = Arc::new(AtomicUsize::new(0));

        let counted = |inner: Arc<dyn OwnershipStrategy>| -> Arc<dyn OwnershipStrategy> {
            Arc::new(CountingStrategy {
                inner,
                calls: strategy_calls.clone(),
            })
        };

        let resolver = StrategyRegistry::new()
            .register(
                ResourceKind::Quiz,
                counted(Arc::new(QuizOwnership::new(ownership.clone()))),
            )
            .and_then(|r| {
                r.register(
                    ResourceKind::Question,
                    counted(Arc::new(QuestionOwnership::new(ownership.clone()))),
                )
            })
            .and_then(|r| {
                r.register(
                    ResourceKind::AnswerOption,
                    counted(Arc::new(AnswerOptionOwnership::new(ownership))),
                )
            })
            .and_then(StrategyRegistry::build)
            .expect("every resource kind has a strategy");
        let resolver = Arc::new(resolver);
        let pipeline = Arc::new(RequestPipeline::new(resolver.clone()));

        Self {
            quizzes: QuizService::new(pipeline.clone(), store.clone()),
            questions: QuestionService::new(pipeline.clone(), store.clone(), store.clone()),
            answer_options: AnswerOptionService::new(pipeline, store.clone()),
            store,
            resolver,
            strategy_calls,
        }
    }

    pub fn strategy_calls(&self) -> usize {
        self.strategy_calls.load(Ordering::SeqCst)
    }
}
