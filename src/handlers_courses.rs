use crate::app_state::AppState;
use crate::db;
use crate::error::AppError;
use crate::models::CourseDetailResponse;
use crate::naming::StorageKey;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let mut conn = state.conn()?;
    let names = db::list_course_names(&mut conn)?;
    Ok(Json(names))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_name): Path<String>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let mut conn = state.conn()?;

    let course = db::find_course(&mut conn, &course_name)?.ok_or_else(AppError::course_not_found)?;

    let files = db::list_course_files(&mut conn, &course)?;
    let links = db::list_course_links(&mut conn, &course)?;

    // Keys are built from the requested name, matching how uploads stored them.
    let files = files
        .iter()
        .map(|f| {
            state
                .storage_client
                .public_url(&StorageKey::new(&course_name, &f.filename))
        })
        .collect();

    Ok(Json(CourseDetailResponse {
        files,
        links: links.into_iter().map(|l| l.url).collect(),
    }))
}
