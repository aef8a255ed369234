use crate::app_state::AppState;
use crate::{handlers_courses, handlers_files, handlers_links};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Headroom above the file limit for multipart framing and the rename field.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let origin: HeaderValue = state
        .config
        .cors_allowed_origin
        .parse()
        .map_err(|e| anyhow::anyhow!("CORS_ALLOWED_ORIGIN is not a valid origin: {}", e))?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(origin);

    let body_limit = state.config.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;

    Ok(Router::new()
        .route("/api/courses", get(handlers_courses::list_courses))
        .route("/api/courses/:course_name", get(handlers_courses::get_course))
        .route(
            "/api/courses/:course_name/upload",
            post(handlers_files::upload_file),
        )
        .route(
            "/api/courses/:course_name/links",
            post(handlers_links::add_link).delete(handlers_links::delete_link),
        )
        .route(
            "/api/courses/:course_name/files/:file_name",
            delete(handlers_files::delete_file),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
