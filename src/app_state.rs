use std::sync::Arc;

use crate::{
    authorization::AuthorizationResolver,
    config::Config,
    db::Database,
    errors::AppResult,
    pipeline::RequestPipeline,
    repositories::{
        MongoAnswerOptionRepository, MongoOwnershipRepository, MongoQuestionRepository,
        MongoQuizRepository,
    },
    services::{AnswerOptionService, QuestionService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub quiz_service: Arc<QuizService>,
    pub question_service: Arc<QuestionService>,
    pub answer_option_service: Arc<AnswerOptionService>,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let answer_option_repository = Arc::new(MongoAnswerOptionRepository::new(&db));
        answer_option_repository.ensure_indexes().await?;

        // A missing strategy stops startup here rather than failing a request later.
        let resolver = AuthorizationResolver::from_repository(Arc::new(
            MongoOwnershipRepository::new(&db),
        ))?;
        let pipeline = Arc::new(RequestPipeline::new(Arc::new(resolver)));

        let quiz_service = Arc::new(QuizService::new(pipeline.clone(), quiz_repository));
        let question_service = Arc::new(QuestionService::new(
            pipeline.clone(),
            question_repository,
            answer_option_repository.clone(),
        ));
        let answer_option_service = Arc::new(AnswerOptionService::new(
            pipeline,
            answer_option_repository,
        ));

        Ok(Self {
            db,
            quiz_service,
            question_service,
            answer_option_service,
        })
    }
}
