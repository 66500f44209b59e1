mod common;

use algo_community::domain::entities::{ApplicantStatus, RecruitStatus, StudyRecruitPostInput};
use algo_community::domain::repositories::StudyRecruitRepository;
use algo_community::error::AppError;
use algo_community::infrastructure::persistence::PgStudyRecruitRepository;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;

fn input(title: &str, capacity: i32) -> StudyRecruitPostInput {
    StudyRecruitPostInput {
        title: title.to_string(),
        content: "Weekly graph problems".to_string(),
        start_date: NaiveDate::from_ymd_opt(2030, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
        expires_at: Utc::now() + Duration::days(7),
        capacity,
    }
}

#[sqlx::test]
async fn test_create_and_find_detail(pool: PgPool) {
    let author = common::create_test_member(&pool, "leader").await;
    let repo = PgStudyRecruitRepository::new(Arc::new(pool));

    let post = repo.create_post(author, input("Graph study", 4)).await.unwrap();

    assert_eq!(post.status, RecruitStatus::Open);
    assert_eq!(post.capacity, 4);
    assert_eq!(post.comment_count, 0);

    let detail = repo.find_detail(post.id).await.unwrap().unwrap();
    assert_eq!(detail.member_nickname, "leader");
    assert_eq!(detail.rank_name, "Bronze");
    assert_eq!(detail.participant_count, 0);
}

#[sqlx::test]
async fn test_hidden_post_has_no_detail(pool: PgPool) {
    let author = common::create_test_member(&pool, "leader").await;
    let repo = PgStudyRecruitRepository::new(Arc::new(pool));

    let post = repo.create_post(author, input("Graph study", 4)).await.unwrap();

    assert!(repo.soft_delete_post(post.id).await.unwrap());
    assert!(!repo.soft_delete_post(post.id).await.unwrap());

    assert!(repo.find_detail(post.id).await.unwrap().is_none());
    assert!(repo.list_posts(0, 20).await.unwrap().is_empty());

    let raw = repo.find_post(post.id).await.unwrap().unwrap();
    assert!(!raw.visible);
}

#[sqlx::test]
async fn test_list_posts_paginates_newest_first(pool: PgPool) {
    let author = common::create_test_member(&pool, "leader").await;
    let repo = PgStudyRecruitRepository::new(Arc::new(pool));

    for title in ["first", "second", "third"] {
        repo.create_post(author, input(title, 4)).await.unwrap();
    }

    let page = repo.list_posts(0, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "third");
    assert_eq!(page[1].title, "second");

    let rest = repo.list_posts(2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].title, "first");
}

#[sqlx::test]
async fn test_update_post_and_close(pool: PgPool) {
    let author = common::create_test_member(&pool, "leader").await;
    let repo = PgStudyRecruitRepository::new(Arc::new(pool));

    let post = repo.create_post(author, input("Graph study", 4)).await.unwrap();

    let updated = repo
        .update_post(post.id, input("DP study", 6))
        .await
        .unwrap();
    assert_eq!(updated.title, "DP study");
    assert_eq!(updated.capacity, 6);

    repo.set_status(post.id, RecruitStatus::Closed).await.unwrap();
    let closed = repo.find_post(post.id).await.unwrap().unwrap();
    assert_eq!(closed.status, RecruitStatus::Closed);
}

#[sqlx::test]
async fn test_applicant_lifecycle(pool: PgPool) {
    let author = common::create_test_member(&pool, "leader").await;
    let applicant = common::create_test_member(&pool, "joiner").await;
    let repo = PgStudyRecruitRepository::new(Arc::new(pool));

    let post = repo.create_post(author, input("Graph study", 4)).await.unwrap();

    let created = repo.create_applicant(post.id, applicant).await.unwrap();
    assert_eq!(created.status, ApplicantStatus::Pending);
    assert_eq!(created.member_nickname, "joiner");

    let duplicate = repo.create_applicant(post.id, applicant).await;
    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));

    let found = repo.find_applicant(post.id, applicant).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    assert_eq!(repo.count_approved(post.id).await.unwrap(), 0);
    let approved = repo
        .set_applicant_status(created.id, ApplicantStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, ApplicantStatus::Approved);
    assert_eq!(repo.count_approved(post.id).await.unwrap(), 1);

    let detail = repo.find_detail(post.id).await.unwrap().unwrap();
    assert_eq!(detail.participant_count, 1);

    let applicants = repo.list_applicants(post.id).await.unwrap();
    assert_eq!(applicants.len(), 1);

    repo.delete_applicant(created.id).await.unwrap();
    assert!(repo.find_applicant_by_id(created.id).await.unwrap().is_none());
}
