use crate::app_state::AppState;
use crate::db;
use crate::error::AppError;
use crate::models::{MessageResponse, NewCourseFile, UploadResponse};
use crate::naming::{self, StorageKey, StoredFileName};
use crate::schema::files;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use diesel::prelude::*;

struct UploadedPart {
    original_name: String,
    content_type: Option<String>,
    data: Bytes,
}

pub async fn upload_file(
    State(state): State<AppState>,
    Path(course_name): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<UploadedPart> = None;
    let mut new_file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                // A part without a filename is a plain form value, not a file.
                let Some(original_name) = field.file_name().map(|s| s.to_string()) else {
                    continue;
                };
                let content_type = field.content_type().map(|s| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                if data.len() > state.config.max_file_size_bytes {
                    return Err(AppError::BadRequest(format!(
                        "File size exceeds maximum of {} bytes",
                        state.config.max_file_size_bytes
                    )));
                }

                upload = Some(UploadedPart {
                    original_name,
                    content_type,
                    data,
                });
            }
            "newFileName" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read newFileName field: {}", e))
                })?;
                new_file_name = Some(text);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("No file uploaded.".to_string()))?;

    let stored_name = naming::derive_stored_filename(
        &upload.original_name,
        new_file_name.as_deref(),
        Utc::now().timestamp_millis(),
    );
    // The extension is copied verbatim, so refuse names delete_file would not accept.
    let stored_name =
        StoredFileName::parse(&stored_name).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let stored_name = stored_name.as_str();
    let key = StorageKey::new(&course_name, stored_name);

    state
        .storage_client
        .upload(&key, upload.data, upload.content_type.as_deref())
        .await?;

    if let Err(e) = record_upload(&state, &course_name, stored_name) {
        discard_unrecorded_object(&state, &key).await;
        return Err(e);
    }

    tracing::info!(%key, "file uploaded");

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        public_url: state.storage_client.public_url(&key),
    }))
}

fn record_upload(state: &AppState, course_name: &str, stored_name: &str) -> Result<(), AppError> {
    let mut conn = state.conn()?;

    let course = db::find_course(&mut conn, course_name)?.ok_or_else(AppError::course_not_found)?;

    diesel::insert_into(files::table)
        .values(NewCourseFile {
            course_id: course.id,
            filename: stored_name,
        })
        .execute(&mut conn)?;

    Ok(())
}

/// Best-effort removal of an object whose metadata row could not be written.
async fn discard_unrecorded_object(state: &AppState, key: &StorageKey) {
    match state.storage_client.delete(key).await {
        Ok(()) => tracing::warn!(%key, "removed stored object without metadata"),
        Err(e) => tracing::error!(%key, error = %e, "stored object left without metadata"),
    }
}

/// Removes the stored object and its metadata row.
///
/// Storage failures are logged and do not stop the metadata delete.
pub async fn delete_file(
    State(state): State<AppState>,
    Path((course_name, file_name)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let file_name =
        StoredFileName::parse(&file_name).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let key = StorageKey::new(&course_name, file_name.as_str());

    if let Err(e) = state.storage_client.delete(&key).await {
        tracing::error!(%key, error = %e, "storage remove failed");
    }

    let mut conn = state.conn()?;

    if let Some(course) = db::find_course(&mut conn, &course_name)? {
        diesel::delete(
            files::table
                .filter(files::course_id.eq(course.id))
                .filter(files::filename.eq(file_name.as_str())),
        )
        .execute(&mut conn)?;
    }

    Ok(Json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}
