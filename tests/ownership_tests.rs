mod common;

use common::Harness;
use simple_quiz_server::{
    authorization::{ResourceKind, ResourceTarget},
    models::{
        domain::{AnswerOption, Question, QuestionType, Quiz},
        ids::{AnswerOptionId, PrincipalId, QuestionId, QuizId},
    },
    repositories::QuizRepository,
};

struct Tree {
    owner: PrincipalId,
    quiz: Quiz,
    question: Question,
    option: AnswerOption,
}

async fn seed(harness: &Harness) -> Tree {
    let owner = PrincipalId::generate();
    let quiz = Quiz::new(owner, "C1", "collection", false);
    let question = Question::new(quiz.id, "Q1", QuestionType::Identification, "answer");
    let option = AnswerOption::new(question.id, "A1", true);

    harness.store.insert_quiz(quiz.clone()).await;
    harness.store.insert_question(question.clone()).await;
    harness.store.insert_answer_option(option.clone()).await;

    Tree {
        owner,
        quiz,
        question,
        option,
    }
}

#[tokio::test]
async fn test_owner_is_authorized_at_every_level() {
    let harness = Harness::new();
    let tree = seed(&harness).await;
    let resolver = &harness.resolver;

    assert!(resolver.authorize(ResourceTarget::quiz(tree.quiz.id), tree.owner).await);
    assert!(
        resolver
            .authorize(ResourceTarget::question(tree.question.id), tree.owner)
            .await
    );
    assert!(
        resolver
            .is_authorized(ResourceKind::AnswerOption, tree.option.id.into(), tree.owner)
            .await
    );
}

#[tokio::test]
async fn test_other_principal_is_denied_at_every_level() {
    let harness = Harness::new();
    let tree = seed(&harness).await;
    let stranger = PrincipalId::generate();
    let resolver = &harness.resolver;

    assert!(!resolver.authorize(ResourceTarget::quiz(tree.quiz.id), stranger).await);
    assert!(
        !resolver
            .authorize(ResourceTarget::question(tree.question.id), stranger)
            .await
    );
    assert!(
        !resolver
            .authorize(ResourceTarget::answer_option(tree.option.id), stranger)
            .await
    );
}

#[tokio::test]
async fn test_question_in_someone_elses_quiz_is_denied() {
    let harness = Harness::new();
    let mine = seed(&harness).await;
    let theirs = seed(&harness).await;

    assert!(
        !harness
            .resolver
            .authorize(ResourceTarget::question(theirs.question.id), mine.owner)
            .await
    );
}

#[tokio::test]
async fn test_deleting_quiz_denies_its_former_question() {
    let harness = Harness::new();
    let tree = seed(&harness).await;

    QuizRepository::delete(harness.store.as_ref(), tree.quiz.id)
        .await
        .unwrap();

    assert!(
        !harness
            .resolver
            .authorize(ResourceTarget::question(tree.question.id), tree.owner)
            .await
    );
    assert!(
        !harness
            .resolver
            .authorize(ResourceTarget::answer_option(tree.option.id), tree.owner)
            .await
    );
}

#[tokio::test]
async fn test_reassigning_quiz_owner_flips_answer_option_access() {
    let harness = Harness::new();
    let tree = seed(&harness).await;
    let new_owner = PrincipalId::generate();
    let target = ResourceTarget::answer_option(tree.option.id);

    assert!(harness.resolver.authorize(target, tree.owner).await);
    assert!(!harness.resolver.authorize(target, new_owner).await);

    harness.store.reassign_owner(tree.quiz.id, new_owner).await;

    assert!(!harness.resolver.authorize(target, tree.owner).await);
    assert!(harness.resolver.authorize(target, new_owner).await);
}

#[tokio::test]
async fn test_unknown_ids_are_denied() {
    let harness = Harness::new();
    let tree = seed(&harness).await;
    let resolver = &harness.resolver;

    assert!(!resolver.authorize(ResourceTarget::quiz(QuizId::generate()), tree.owner).await);
    assert!(
        !resolver
            .authorize(ResourceTarget::question(QuestionId::generate()), tree.owner)
            .await
    );
    assert!(
        !resolver
            .authorize(ResourceTarget::answer_option(AnswerOptionId::generate()), tree.owner)
            .await
    );
}

#[tokio::test]
async fn test_store_fault_is_a_denial() {
    let harness = Harness::new();
    let tree = seed(&harness).await;

    harness.store.set_failing(true);

    assert!(!harness.resolver.authorize(ResourceTarget::quiz(tree.quiz.id), tree.owner).await);
    assert!(
        !harness
            .resolver
            .authorize(ResourceTarget::answer_option(tree.option.id), tree.owner)
            .await
    );

    harness.store.set_failing(false);
    assert!(harness.resolver.authorize(ResourceTarget::quiz(tree.quiz.id), tree.owner).await);
}
