use crate::app_state::AppState;
use crate::db;
use crate::error::AppError;
use crate::models::{LinkRequest, LinkResponse, MessageResponse, NewCourseLink};
use crate::naming::LinkUrl;
use crate::schema::links;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;

pub async fn add_link(
    State(state): State<AppState>,
    Path(course_name): Path<String>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = LinkUrl::parse(&payload.link).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut conn = state.conn()?;

    let course = db::find_course(&mut conn, &course_name)?.ok_or_else(AppError::course_not_found)?;

    diesel::insert_into(links::table)
        .values(NewCourseLink {
            course_id: course.id,
            url: link.as_str(),
        })
        .execute(&mut conn)?;

    tracing::info!(course = %course_name, link = %link.as_str(), "link added");

    Ok(Json(LinkResponse {
        message: "Link added successfully".to_string(),
        link: link.into_inner(),
    }))
}

/// Deletes every link of the course whose URL matches exactly.
///
/// Succeeds whether or not the course or the link existed.
pub async fn delete_link(
    State(state): State<AppState>,
    Path(course_name): Path<String>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut conn = state.conn()?;

    if let Some(course) = db::find_course(&mut conn, &course_name)? {
        let removed = diesel::delete(
            links::table
                .filter(links::course_id.eq(course.id))
                .filter(links::url.eq(&payload.link)),
        )
        .execute(&mut conn)?;

        tracing::info!(course = %course_name, removed, "link delete");
    }

    Ok(Json(MessageResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
