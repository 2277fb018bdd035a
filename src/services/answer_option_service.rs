use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    auth::PrincipalContext,
    authorization::ResourceTarget,
    errors::AppResult,
    models::{
        domain::AnswerOption,
        dto::request::{AddAnswerOptionRequest, DeleteAnswerOptionRequest},
        ids::PrincipalId,
    },
    pipeline::{Access, RequestHandler, RequestPipeline},
    repositories::AnswerOptionRepository,
};

pub struct AddAnswerOption {
    repository: Arc<dyn AnswerOptionRepository>,
}

#[async_trait]
impl RequestHandler for AddAnswerOption {
    type Request = AddAnswerOptionRequest;
    type Resource = ();
    type Response = AnswerOption;

    const NAME: &'static str = "add_answer_option";

    fn access(&self, request: &AddAnswerOptionRequest) -> Access {
        Access::Owner(ResourceTarget::question(request.question_id))
    }

    async fn locate(&self, _request: &AddAnswerOptionRequest) -> AppResult<Option<()>> {
        Ok(Some(()))
    }

    async fn execute(
        &self,
        _caller: Option<PrincipalId>,
        request: AddAnswerOptionRequest,
        _: (),
    ) -> AppResult<AnswerOption> {
        let option = AnswerOption::new(request.question_id, &request.text, request.is_correct);
        self.repository.create(option).await
    }
}

pub struct DeleteAnswerOption {
    repository: Arc<dyn AnswerOptionRepository>,
}

#[async_trait]
impl RequestHandler for DeleteAnswerOption {
    type Request = DeleteAnswerOptionRequest;
    type Resource = AnswerOption;
    type Response = ();

    const NAME: &'static str = "delete_answer_option";

    fn access(&self, request: &DeleteAnswerOptionRequest) -> Access {
        Access::Owner(ResourceTarget::answer_option(request.answer_option_id))
    }

    async fn locate(&self, request: &DeleteAnswerOptionRequest) -> AppResult<Option<AnswerOption>> {
        self.repository.find_by_id(request.answer_option_id).await
    }

    async fn execute(
        &self,
        _caller: Option<PrincipalId>,
        _request: DeleteAnswerOptionRequest,
        option: AnswerOption,
    ) -> AppResult<()> {
        self.repository.delete(option.id).await
    }
}

pub struct AnswerOptionService {
    pipeline: Arc<RequestPipeline>,
    add: AddAnswerOption,
    delete: DeleteAnswerOption,
}

impl AnswerOptionService {
    pub fn new(pipeline: Arc<RequestPipeline>, repository: Arc<dyn AnswerOptionRepository>) -> Self {
        Self {
            pipeline,
            add: AddAnswerOption {
                repository: repository.clone(),
            },
            delete: DeleteAnswerOption { repository },
        }
    }

    pub async fn add_answer_option(
        &self,
        request: AddAnswerOptionRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<AnswerOption> {
        self.pipeline.run(&self.add, request, principal).await
    }

    pub async fn delete_answer_option(
        &self,
        request: DeleteAnswerOptionRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<()> {
        self.pipeline.run(&self.delete, request, principal).await
    }
}
