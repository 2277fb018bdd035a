use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    auth::PrincipalContext,
    authorization::ResourceTarget,
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::request::{
            CreateQuizRequest, DeleteQuizRequest, GetQuizRequest, ListUserQuizzesRequest,
            UpdateQuizRequest,
        },
        ids::PrincipalId,
    },
    pipeline::{Access, RequestHandler, RequestPipeline},
    repositories::QuizRepository,
};

fn require_caller(caller: Option<PrincipalId>) -> AppResult<PrincipalId> {
    caller.ok_or_else(|| {
        AppError::InternalError("authenticated operation ran without a caller".to_string())
    })
}

pub struct CreateQuiz {
    repository: Arc<dyn QuizRepository>,
}

#[async_trait]
impl RequestHandler for CreateQuiz {
    type Request = CreateQuizRequest;
    type Resource = ();
    type Response = Quiz;

    const NAME: &'static str = "create_quiz";

    fn access(&self, _request: &CreateQuizRequest) -> Access {
        Access::Authenticated
    }

    async fn locate(&self, _request: &CreateQuizRequest) -> AppResult<Option<()>> {
        Ok(Some(()))
    }

    async fn execute(
        &self,
        caller: Option<PrincipalId>,
        request: CreateQuizRequest,
        _: (),
    ) -> AppResult<Quiz> {
        let owner = require_caller(caller)?;
        let quiz = Quiz::new(owner, &request.title, &request.description, request.is_public);
        let quiz = self.repository.create(quiz).await?;
        log::info!("Quiz {} created by {}", quiz.id, owner);
        Ok(quiz)
    }
}

pub struct UpdateQuiz {
    repository: Arc<dyn QuizRepository>,
}

#[async_trait]
impl RequestHandler for UpdateQuiz {
    type Request = UpdateQuizRequest;
    type Resource = Quiz;
    type Response = Quiz;

    const NAME: &'static str = "update_quiz";

    fn access(&self, request: &UpdateQuizRequest) -> Access {
        Access::Owner(ResourceTarget::quiz(request.quiz_id))
    }

    async fn locate(&self, request: &UpdateQuizRequest) -> AppResult<Option<Quiz>> {
        self.repository.find_by_id(request.quiz_id).await
    }

    async fn execute(
        &self,
        _caller: Option<PrincipalId>,
        request: UpdateQuizRequest,
        mut quiz: Quiz,
    ) -> AppResult<Quiz> {
        quiz.update(&request.title, &request.description, request.is_public);
        self.repository.update(quiz).await
    }
}

pub struct DeleteQuiz {
    repository: Arc<dyn QuizRepository>,
}

#[async_trait]
impl RequestHandler for DeleteQuiz {
    type Request = DeleteQuizRequest;
    type Resource = Quiz;
    type Response = ();

    const NAME: &'static str = "delete_quiz";

    fn access(&self, request: &DeleteQuizRequest) -> Access {
        Access::Owner(ResourceTarget::quiz(request.quiz_id))
    }

    async fn locate(&self, request: &DeleteQuizRequest) -> AppResult<Option<Quiz>> {
        self.repository.find_by_id(request.quiz_id).await
    }

    async fn execute(
        &self,
        caller: Option<PrincipalId>,
        _request: DeleteQuizRequest,
        quiz: Quiz,
    ) -> AppResult<()> {
        self.repository.delete(quiz.id).await?;
        log::info!("Quiz {} deleted by {:?}", quiz.id, caller);
        Ok(())
    }
}

pub struct GetQuiz {
    repository: Arc<dyn QuizRepository>,
}

#[async_trait]
impl RequestHandler for GetQuiz {
    type Request = GetQuizRequest;
    type Resource = Quiz;
    type Response = Quiz;

    const NAME: &'static str = "get_quiz";

    fn access(&self, _request: &GetQuizRequest) -> Access {
        Access::Anonymous
    }

    async fn locate(&self, request: &GetQuizRequest) -> AppResult<Option<Quiz>> {
        self.repository.find_by_id(request.quiz_id).await
    }

    async fn execute(&self, _: Option<PrincipalId>, _: GetQuizRequest, quiz: Quiz) -> AppResult<Quiz> {
        Ok(quiz)
    }
}

pub struct ListUserQuizzes {
    repository: Arc<dyn QuizRepository>,
}

#[async_trait]
impl RequestHandler for ListUserQuizzes {
    type Request = ListUserQuizzesRequest;
    type Resource = ();
    type Response = Vec<Quiz>;

    const NAME: &'static str = "list_user_quizzes";

    fn access(&self, _request: &ListUserQuizzesRequest) -> Access {
        Access::Anonymous
    }

    async fn locate(&self, _request: &ListUserQuizzesRequest) -> AppResult<Option<()>> {
        Ok(Some(()))
    }

    async fn execute(
        &self,
        _: Option<PrincipalId>,
        request: ListUserQuizzesRequest,
        _: (),
    ) -> AppResult<Vec<Quiz>> {
        self.repository.list_by_owner(request.owner_id).await
    }
}

pub struct QuizService {
    pipeline: Arc<RequestPipeline>,
    create: CreateQuiz,
    update: UpdateQuiz,
    delete: DeleteQuiz,
    get: GetQuiz,
    list_by_owner: ListUserQuizzes,
}

impl QuizService {
    pub fn new(pipeline: Arc<RequestPipeline>, repository: Arc<dyn QuizRepository>) -> Self {
        Self {
            pipeline,
            create: CreateQuiz {
                repository: repository.clone(),
            },
            update: UpdateQuiz {
                repository: repository.clone(),
            },
            delete: DeleteQuiz {
                repository: repository.clone(),
            },
            get: GetQuiz {
                repository: repository.clone(),
            },
            list_by_owner: ListUserQuizzes { repository },
        }
    }

    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<Quiz> {
        self.pipeline.run(&self.create, request, principal).await
    }

    pub async fn update_quiz(
        &self,
        request: UpdateQuizRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<Quiz> {
        self.pipeline.run(&self.update, request, principal).await
    }

    /// Removes the quiz together with its questions and their answer options.
    pub async fn delete_quiz(
        &self,
        request: DeleteQuizRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<()> {
        self.pipeline.run(&self.delete, request, principal).await
    }

    pub async fn get_quiz(
        &self,
        request: GetQuizRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<Quiz> {
        self.pipeline.run(&self.get, request, principal).await
    }

    pub async fn list_user_quizzes(
        &self,
        request: ListUserQuizzesRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<Vec<Quiz>> {
        self.pipeline.run(&self.list_by_owner, request, principal).await
    }
}
