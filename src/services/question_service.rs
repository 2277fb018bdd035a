use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::{
    auth::PrincipalContext,
    authorization::ResourceTarget,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOption, Question, QuestionType},
        dto::{
            request::{
                CreateQuestionRequest, DeleteQuestionRequest, ListQuizQuestionsRequest,
                UpdateQuestionRequest,
            },
            response::QuestionWithOptions,
        },
        ids::{PrincipalId, QuestionId},
    },
    pipeline::{Access, RequestHandler, RequestPipeline},
    repositories::{AnswerOptionRepository, QuestionRepository},
};

fn parse_question_type(value: &str) -> AppResult<QuestionType> {
    value.parse().map_err(AppError::ValidationError)
}

pub struct CreateQuestion {
    questions: Arc<dyn QuestionRepository>,
    answer_options: Arc<dyn AnswerOptionRepository>,
}

#[async_trait]
impl RequestHandler for CreateQuestion {
    type Request = CreateQuestionRequest;
    type Resource = ();
    type Response = QuestionWithOptions;

    const NAME: &'static str = "create_question";

    fn access(&self, request: &CreateQuestionRequest) -> Access {
        Access::Owner(ResourceTarget::quiz(request.quiz_id))
    }

    async fn locate(&self, _request: &CreateQuestionRequest) -> AppResult<Option<()>> {
        Ok(Some(()))
    }

    async fn execute(
        &self,
        _caller: Option<PrincipalId>,
        request: CreateQuestionRequest,
        _: (),
    ) -> AppResult<QuestionWithOptions> {
        let question_type = parse_question_type(&request.question_type)?;
        let question = Question::new(
            request.quiz_id,
            &request.text,
            question_type,
            &request.correct_answer,
        );
        let question = self.questions.create(question).await?;

        let options: Vec<AnswerOption> = request
            .answer_options
            .iter()
            .map(|option| AnswerOption::new(question.id, &option.text, option.is_correct))
            .collect();
        let answer_options = if options.is_empty() {
            Vec::new()
        } else {
            match self.answer_options.create_many(options).await {
                Ok(created) => created,
                Err(err) => {
                    // A question never stays behind without the options it was created with.
                    if let Err(cleanup) = self.questions.delete(question.id).await {
                        log::error!(
                            "Failed to remove question {} after its options were rejected: {}",
                            question.id,
                            cleanup
                        );
                    }
                    return Err(err);
                }
            }
        };

        log::info!(
            "Question {} added to quiz {} with {} options",
            question.id,
            question.quiz_id,
            answer_options.len()
        );

        Ok(QuestionWithOptions {
            question,
            answer_options,
        })
    }
}

pub struct UpdateQuestion {
    questions: Arc<dyn QuestionRepository>,
}

#[async_trait]
impl RequestHandler for UpdateQuestion {
    type Request = UpdateQuestionRequest;
    type Resource = Question;
    type Response = Question;

    const NAME: &'static str = "update_question";

    fn access(&self, request: &UpdateQuestionRequest) -> Access {
        Access::Owner(ResourceTarget::question(request.question_id))
    }

    async fn locate(&self, request: &UpdateQuestionRequest) -> AppResult<Option<Question>> {
        self.questions.find_by_id(request.question_id).await
    }

    async fn execute(
        &self,
        _caller: Option<PrincipalId>,
        request: UpdateQuestionRequest,
        mut question: Question,
    ) -> AppResult<Question> {
        let question_type = parse_question_type(&request.question_type)?;
        question.update(&request.text, question_type, &request.correct_answer);
        self.questions.update(question).await
    }
}

pub struct DeleteQuestion {
    questions: Arc<dyn QuestionRepository>,
}

#[async_trait]
impl RequestHandler for DeleteQuestion {
    type Request = DeleteQuestionRequest;
    type Resource = Question;
    type Response = ();

    const NAME: &'static str = "delete_question";

    fn access(&self, request: &DeleteQuestionRequest) -> Access {
        Access::Owner(ResourceTarget::question(request.question_id))
    }

    async fn locate(&self, request: &DeleteQuestionRequest) -> AppResult<Option<Question>> {
        self.questions.find_by_id(request.question_id).await
    }

    async fn execute(
        &self,
        _caller: Option<PrincipalId>,
        _request: DeleteQuestionRequest,
        question: Question,
    ) -> AppResult<()> {
        self.questions.delete(question.id).await
    }
}

pub struct ListQuizQuestions {
    questions: Arc<dyn QuestionRepository>,
    answer_options: Arc<dyn AnswerOptionRepository>,
}

#[async_trait]
impl RequestHandler for ListQuizQuestions {
    type Request = ListQuizQuestionsRequest;
    type Resource = ();
    type Response = Vec<QuestionWithOptions>;

    const NAME: &'static str = "list_quiz_questions";

    fn access(&self, _request: &ListQuizQuestionsRequest) -> Access {
        Access::Anonymous
    }

    async fn locate(&self, _request: &ListQuizQuestionsRequest) -> AppResult<Option<()>> {
        Ok(Some(()))
    }

    async fn execute(
        &self,
        _: Option<PrincipalId>,
        request: ListQuizQuestionsRequest,
        _: (),
    ) -> AppResult<Vec<QuestionWithOptions>> {
        let questions = self.questions.list_by_quiz(request.quiz_id).await?;
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let ids = questions.iter().map(|q| q.id).collect();
        let mut by_question: HashMap<QuestionId, Vec<AnswerOption>> = HashMap::new();
        for option in self.answer_options.list_by_questions(ids).await? {
            by_question.entry(option.question_id).or_default().push(option);
        }

        Ok(questions
            .into_iter()
            .map(|question| QuestionWithOptions {
                answer_options: by_question.remove(&question.id).unwrap_or_default(),
                question,
            })
            .collect())
    }
}

pub struct QuestionService {
    pipeline: Arc<RequestPipeline>,
    create: CreateQuestion,
    update: UpdateQuestion,
    delete: DeleteQuestion,
    list_by_quiz: ListQuizQuestions,
}

impl QuestionService {
    pub fn new(
        pipeline: Arc<RequestPipeline>,
        questions: Arc<dyn QuestionRepository>,
        answer_options: Arc<dyn AnswerOptionRepository>,
    ) -> Self {
        Self {
            pipeline,
            create: CreateQuestion {
                questions: questions.clone(),
                answer_options: answer_options.clone(),
            },
            update: UpdateQuestion {
                questions: questions.clone(),
            },
            delete: DeleteQuestion {
                questions: questions.clone(),
            },
            list_by_quiz: ListQuizQuestions {
                questions,
                answer_options,
            },
        }
    }

    pub async fn create_question(
        &self,
        request: CreateQuestionRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<QuestionWithOptions> {
        self.pipeline.run(&self.create, request, principal).await
    }

    pub async fn update_question(
        &self,
        request: UpdateQuestionRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<Question> {
        self.pipeline.run(&self.update, request, principal).await
    }

    pub async fn delete_question(
        &self,
        request: DeleteQuestionRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<()> {
        self.pipeline.run(&self.delete, request, principal).await
    }

    pub async fn list_quiz_questions(
        &self,
        request: ListQuizQuestionsRequest,
        principal: &dyn PrincipalContext,
    ) -> AppResult<Vec<QuestionWithOptions>> {
        self.pipeline.run(&self.list_by_quiz, request, principal).await
    }
}
