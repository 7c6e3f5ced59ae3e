/// Course endpoints
///
/// - `POST /courses` - Create a course together with its instructor,
///   modules and lessons
/// - `GET /courses` - List every course as `{id, title, price, level}`
/// - `GET /courses/:id` - One course with its module/lesson tree
///
/// There is no authentication and no pagination.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use elearning_shared::{
    catalog::{self, CourseDetail, NewCourse},
    models::course::CourseSummary,
};
use serde::{Deserialize, Serialize};

/// Confirmation text returned on successful creation
pub const COURSE_CREATED_MESSAGE: &str = "Course saved in SQL database";

/// Create course response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCourseResponse {
    pub message: String,

    /// ID of the persisted course
    pub course_id: String,
}

/// Create course
///
/// # Endpoint
///
/// ```text
/// POST /courses
/// Content-Type: application/json
///
/// {
///   "instructor": {"full_name": "A", "email": "a@x.com"},
///   "title": "T",
///   "description": "optional",
///   "price": 19.99,
///   "level": "beginner",
///   "modules": [
///     {"title": "M1", "module_order": 1, "lessons": [
///       {"title": "L1", "lesson_type": "video", "lesson_order": 1, "content": "optional"}
///     ]}
///   ]
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {"message": "Course saved in SQL database", "course_id": "uuid"}
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: missing/malformed fields (nothing is
///   written), a duplicate instructor email, or any other storage failure
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<NewCourse>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateCourseResponse>)> {
    let Json(new_course) = payload?;

    let course = catalog::create_course(&state.db, new_course, state.commit_mode()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCourseResponse {
            message: COURSE_CREATED_MESSAGE.to_string(),
            course_id: course.id,
        }),
    ))
}

/// List courses
///
/// Returns every course in storage order. Only `id`, `title`, `price` and
/// `level` are exposed; missing values are `null`.
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseSummary>>> {
    let courses = catalog::list_courses(&state.db).await?;
    Ok(Json(courses))
}

/// Course detail
///
/// # Errors
///
/// - `404 Not Found`: no course with this id
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseDetail>> {
    let detail = catalog::get_course_detail(&state.db, &course_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Course {} not found", course_id)))?;

    Ok(Json(detail))
}
