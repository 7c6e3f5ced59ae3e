//! Integration tests for the course catalog operations
//!
//! Covers the nested creation chain in both commit modes, listing, and the
//! course detail read path.

use elearning_shared::catalog::{
    create_course, get_course_detail, list_courses, CommitMode, NewCourse,
};
use elearning_shared::db::{self, pool::DatabaseConfig};
use elearning_shared::models::{
    course::Course,
    lesson::Lesson,
    module::Module,
    user::{User, UserRole},
};
use serde_json::json;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
    let pool = db::connect(DatabaseConfig {
        url,
        ..Default::default()
    })
    .await
    .expect("Failed to bootstrap database");
    (dir, pool)
}

fn payload(value: serde_json::Value) -> NewCourse {
    serde_json::from_value(value).expect("valid payload")
}

fn three_module_course(email: &str) -> NewCourse {
    payload(json!({
        "instructor": {"full_name": "Ada", "email": email},
        "title": "Systems Programming",
        "description": "From pointers to processes",
        "price": 99.0,
        "level": "advanced",
        "modules": [
            {"title": "Memory", "module_order": 3, "lessons": [
                {"title": "Stack", "lesson_type": "video", "lesson_order": 1},
                {"title": "Heap", "lesson_type": "article", "lesson_order": 2, "content": "malloc"}
            ]},
            {"title": "Intro", "module_order": 1},
            {"title": "Processes", "module_order": 2, "lessons": [
                {"title": "fork", "lesson_type": "coding", "lesson_order": 1}
            ]}
        ]
    }))
}

async fn row_counts(pool: &SqlitePool) -> (i64, i64, i64, i64) {
    (
        User::count(pool).await.unwrap(),
        Course::count(pool).await.unwrap(),
        Module::count(pool).await.unwrap(),
        Lesson::count(pool).await.unwrap(),
    )
}

#[tokio::test]
async fn test_create_course_writes_every_row() {
    let (_dir, pool) = test_pool().await;

    let new_course = three_module_course("ada@x.com");
    assert_eq!(new_course.row_count(), 1 + 1 + 3 + 3);

    let course = create_course(&pool, new_course, CommitMode::PerStage)
        .await
        .expect("create course");

    assert_eq!(row_counts(&pool).await, (1, 1, 3, 3));
    assert!(course.is_published);
    assert_eq!(course.price, Some(99.0));
    assert_eq!(course.level.as_deref(), Some("advanced"));

    let instructor = User::find_by_id(&pool, &course.instructor_id)
        .await
        .unwrap()
        .expect("instructor row");
    assert_eq!(instructor.role, UserRole::Instructor);
    assert_eq!(instructor.email, "ada@x.com");
}

#[tokio::test]
async fn test_atomic_mode_writes_every_row() {
    let (_dir, pool) = test_pool().await;

    create_course(&pool, three_module_course("ada@x.com"), CommitMode::Atomic)
        .await
        .expect("create course");

    assert_eq!(row_counts(&pool).await, (1, 1, 3, 3));
}

#[tokio::test]
async fn test_modules_keep_payload_order() {
    let (_dir, pool) = test_pool().await;

    let course = create_course(&pool, three_module_course("ada@x.com"), CommitMode::PerStage)
        .await
        .unwrap();

    let detail = get_course_detail(&pool, &course.id).await.unwrap().unwrap();

    let titles: Vec<&str> = detail.modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Memory", "Intro", "Processes"]);

    let orders: Vec<i32> = detail.modules.iter().map(|m| m.module_order).collect();
    assert_eq!(orders, vec![3, 1, 2]);

    assert_eq!(detail.modules[0].lessons.len(), 2);
    assert_eq!(detail.modules[0].lessons[1].content.as_deref(), Some("malloc"));
    assert!(detail.modules[1].lessons.is_empty());
    assert_eq!(detail.modules[2].lessons[0].lesson_type, "coding");

    let instructor = detail.instructor.expect("instructor summary");
    assert_eq!(instructor.full_name, "Ada");
}

#[tokio::test]
async fn test_duplicate_instructor_email_fails_without_second_user() {
    let (_dir, pool) = test_pool().await;

    create_course(&pool, three_module_course("same@x.com"), CommitMode::PerStage)
        .await
        .expect("first create");

    let err = create_course(&pool, three_module_course("same@x.com"), CommitMode::PerStage)
        .await
        .expect_err("second create must fail");

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected unique violation, got {other:?}"),
    }

    assert_eq!(row_counts(&pool).await, (1, 1, 3, 3));
}

#[tokio::test]
async fn test_per_stage_failure_leaves_earlier_rows() {
    let (_dir, pool) = test_pool().await;

    // Makes the final lesson batch fail after modules are written
    sqlx::query("DROP TABLE lessons").execute(&pool).await.unwrap();

    let result = create_course(&pool, three_module_course("ada@x.com"), CommitMode::PerStage).await;
    assert!(result.is_err());

    assert_eq!(User::count(&pool).await.unwrap(), 1);
    assert_eq!(Course::count(&pool).await.unwrap(), 1);
    assert_eq!(Module::count(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_atomic_failure_rolls_back_everything() {
    let (_dir, pool) = test_pool().await;

    sqlx::query("DROP TABLE lessons").execute(&pool).await.unwrap();

    let result = create_course(&pool, three_module_course("ada@x.com"), CommitMode::Atomic).await;
    assert!(result.is_err());

    assert_eq!(User::count(&pool).await.unwrap(), 0);
    assert_eq!(Course::count(&pool).await.unwrap(), 0);
    assert_eq!(Module::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_courses_returns_summaries() {
    let (_dir, pool) = test_pool().await;

    let first = create_course(
        &pool,
        payload(json!({
            "instructor": {"full_name": "A", "email": "a@x.com"},
            "title": "T"
        })),
        CommitMode::PerStage,
    )
    .await
    .unwrap();

    let second = create_course(&pool, three_module_course("b@x.com"), CommitMode::PerStage)
        .await
        .unwrap();

    let courses = list_courses(&pool).await.unwrap();
    assert_eq!(courses.len(), 2);

    let listed_first = courses.iter().find(|c| c.id == first.id).expect("first listed");
    assert_eq!(listed_first.title, "T");
    assert_eq!(listed_first.price, None);
    assert_eq!(listed_first.level, None);

    let listed_second = courses.iter().find(|c| c.id == second.id).expect("second listed");
    assert_eq!(listed_second.price, Some(99.0));
}

#[tokio::test]
async fn test_list_courses_empty() {
    let (_dir, pool) = test_pool().await;
    assert!(list_courses(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_course_detail_unknown_id() {
    let (_dir, pool) = test_pool().await;
    assert!(get_course_detail(&pool, "no-such-course").await.unwrap().is_none());
}
