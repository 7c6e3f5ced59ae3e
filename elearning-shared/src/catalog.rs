/// Course catalog operations
///
/// This module holds the nested course-creation chain and the read paths
/// built on top of the models.
///
/// # Creation order
///
/// ```text
/// instructor (users) → course → module₁ … moduleₙ → lesson batch
/// ```
///
/// Modules are inserted in payload order; `module_order` and `lesson_order`
/// are stored, never used for sorting. Lessons are staged while modules are
/// written and go to the database as one batch at the end.
///
/// # Commit modes
///
/// - [`CommitMode::PerStage`]: the instructor, the course and each module
///   commit on their own; the lesson batch commits once. A failure part way
///   leaves the earlier rows in place.
/// - [`CommitMode::Atomic`]: the whole chain runs in one transaction and a
///   failure anywhere rolls everything back.
///
/// Both modes run on a single pooled connection acquired for the call and
/// released when it returns, on success or error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{Connection, SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

use crate::models::{
    course::{Course, CourseSummary, CreateCourse},
    lesson::{CreateLesson, Lesson},
    module::{CreateModule, Module},
    user::{CreateUser, User, UserRole},
};

/// How the course-creation chain commits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    /// Each stage commits independently (no rollback on partial failure)
    #[default]
    PerStage,

    /// One transaction around the whole chain
    Atomic,
}

/// Course-creation payload
///
/// `description`, `price`, `level` and `modules` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub instructor: NewInstructor,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub level: Option<String>,
    #[serde(default)]
    pub modules: Vec<NewModule>,
}

/// Instructor created alongside the course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstructor {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewModule {
    pub title: String,
    pub module_order: i32,
    #[serde(default)]
    pub lessons: Vec<NewLesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLesson {
    pub title: String,
    pub lesson_type: String,
    pub content: Option<String>,
    pub lesson_order: i32,
}

impl NewCourse {
    /// Total rows the chain writes: instructor + course + modules + lessons
    pub fn row_count(&self) -> usize {
        2 + self.modules.len()
            + self.modules.iter().map(|m| m.lessons.len()).sum::<usize>()
    }
}

/// Instructor fields exposed in course detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorSummary {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// A module with its lessons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDetail {
    pub id: String,
    pub title: String,
    pub module_order: i32,
    pub lessons: Vec<Lesson>,
}

/// A course with its instructor and full module/lesson tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: Option<InstructorSummary>,
    pub modules: Vec<ModuleDetail>,
}

/// Creates an instructor, a course, its modules and their lessons
///
/// Returns the persisted course row.
///
/// # Errors
///
/// Any statement failure is returned as-is. A duplicate instructor email
/// surfaces as a unique-constraint [`sqlx::Error::Database`]. What stays
/// committed after an error depends on `mode`.
#[instrument(skip(pool, new_course), fields(title = %new_course.title))]
pub async fn create_course(
    pool: &SqlitePool,
    new_course: NewCourse,
    mode: CommitMode,
) -> Result<Course, sqlx::Error> {
    let expected_rows = new_course.row_count();
    let mut conn = pool.acquire().await?;

    let course = match mode {
        CommitMode::PerStage => {
            let (course, staged) = insert_course_tree(&mut conn, new_course).await?;

            let mut tx = conn.begin().await?;
            insert_lessons(&mut tx, staged).await?;
            tx.commit().await?;

            course
        }
        CommitMode::Atomic => {
            let mut tx = conn.begin().await?;

            let (course, staged) = insert_course_tree(&mut tx, new_course).await?;
            insert_lessons(&mut tx, staged).await?;
            tx.commit().await?;

            course
        }
    };

    info!(
        course_id = %course.id,
        rows = expected_rows,
        ?mode,
        "Course saved"
    );

    Ok(course)
}

/// Writes instructor, course and modules; returns the course and the
/// lessons staged against the new module ids
async fn insert_course_tree(
    conn: &mut SqliteConnection,
    new_course: NewCourse,
) -> Result<(Course, Vec<CreateLesson>), sqlx::Error> {
    let instructor = User::create(
        &mut *conn,
        CreateUser {
            full_name: new_course.instructor.full_name,
            email: new_course.instructor.email,
            role: UserRole::Instructor,
        },
    )
    .await?;
    debug!(instructor_id = %instructor.id, "Instructor inserted");

    let course = Course::create(
        &mut *conn,
        CreateCourse {
            instructor_id: instructor.id,
            title: new_course.title,
            description: new_course.description,
            price: new_course.price,
            level: new_course.level,
            is_published: true,
        },
    )
    .await?;
    debug!(course_id = %course.id, "Course inserted");

    let mut staged = Vec::new();

    for new_module in new_course.modules {
        let module = Module::create(
            &mut *conn,
            CreateModule {
                course_id: course.id.clone(),
                title: new_module.title,
                module_order: new_module.module_order,
            },
        )
        .await?;
        debug!(module_id = %module.id, module_order = module.module_order, "Module inserted");

        staged.extend(new_module.lessons.into_iter().map(|lesson| CreateLesson {
            module_id: module.id.clone(),
            title: lesson.title,
            lesson_type: lesson.lesson_type,
            content: lesson.content,
            lesson_order: lesson.lesson_order,
        }));
    }

    Ok((course, staged))
}

async fn insert_lessons(
    conn: &mut SqliteConnection,
    staged: Vec<CreateLesson>,
) -> Result<usize, sqlx::Error> {
    let count = staged.len();

    for lesson in staged {
        Lesson::create(&mut *conn, lesson).await?;
    }

    debug!(lessons = count, "Lesson batch inserted");
    Ok(count)
}

/// Lists every course as `{id, title, price, level}`
pub async fn list_courses(pool: &SqlitePool) -> Result<Vec<CourseSummary>, sqlx::Error> {
    let courses = Course::list_summaries(pool).await?;
    debug!(count = courses.len(), "Listed courses");
    Ok(courses)
}

/// Loads one course with its instructor, modules and lessons
///
/// Returns `None` when no course has this id.
pub async fn get_course_detail(
    pool: &SqlitePool,
    course_id: &str,
) -> Result<Option<CourseDetail>, sqlx::Error> {
    let Some(course) = Course::find_by_id(pool, course_id).await? else {
        return Ok(None);
    };

    let instructor = User::find_by_id(pool, &course.instructor_id)
        .await?
        .map(|user| InstructorSummary {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        });

    let mut lessons_by_module: HashMap<String, Vec<Lesson>> = HashMap::new();
    for lesson in Lesson::list_by_course(pool, course_id).await? {
        lessons_by_module
            .entry(lesson.module_id.clone())
            .or_default()
            .push(lesson);
    }

    let modules = Module::list_by_course(pool, course_id)
        .await?
        .into_iter()
        .map(|module| ModuleDetail {
            lessons: lessons_by_module.remove(&module.id).unwrap_or_default(),
            id: module.id,
            title: module.title,
            module_order: module.module_order,
        })
        .collect();

    Ok(Some(CourseDetail {
        course,
        instructor,
        modules,
    }))
}
