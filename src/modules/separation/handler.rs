use crate::common::response::ErrorBody;
use crate::modules::separation::dto::*;
use crate::modules::separation::service::SeparationService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    post,
    path = "/apiv1/separate",
    request_body = SeparateRequest,
    responses(
        (status = 200, description = "Song enqueued for separation", body = SeparateResponse),
        (status = 400, description = "Malformed JSON, base64 or missing field", body = ErrorBody),
        (status = 500, description = "Queue or storage unavailable", body = ErrorBody)
    ),
    tag = "Separation"
)]
pub async fn separate(
    State(state): State<AppState>,
    Json(req): Json<SeparateRequest>,
) -> impl IntoResponse {
    match SeparationService::submit(&state, req).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/apiv1/queue",
    responses(
        (status = 200, description = "Content addresses of pending jobs", body = QueueResponse),
        (status = 500, description = "Queue unavailable", body = ErrorBody)
    ),
    tag = "Separation"
)]
pub async fn show_queue(State(state): State<AppState>) -> impl IntoResponse {
    match SeparationService::queue_snapshot(&state).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/apiv1/track/{songhash}/{track}",
    params(
        ("songhash" = String, Path, description = "Content address of the submitted song"),
        ("track" = String, Path, description = "Stem name, e.g. vocals.mp3")
    ),
    responses(
        (status = 200, description = "Raw stem audio", body = Vec<u8>, content_type = "audio/mpeg"),
        (status = 400, description = "Invalid stem name", body = ErrorBody),
        (status = 404, description = "Stem not produced", body = ErrorBody)
    ),
    tag = "Separation"
)]
pub async fn get_track(
    State(state): State<AppState>,
    Path((songhash, track)): Path<(String, String)>,
) -> impl IntoResponse {
    match SeparationService::fetch_stem(&state, &songhash, &track).await {
        Ok((stem, bytes)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "audio/mpeg".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", stem.file_name()),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/apiv1/remove/{songhash}/{track}",
    params(
        ("songhash" = String, Path, description = "Content address of the submitted song"),
        ("track" = String, Path, description = "Stem name, e.g. vocals.mp3")
    ),
    responses(
        (status = 200, description = "Stem removed", body = RemoveResponse),
        (status = 400, description = "Invalid stem name", body = ErrorBody),
        (status = 404, description = "Stem not present", body = ErrorBody)
    ),
    tag = "Separation"
)]
pub async fn remove_track(
    State(state): State<AppState>,
    Path((songhash, track)): Path<(String, String)>,
) -> impl IntoResponse {
    match SeparationService::remove_stem(&state, &songhash, &track).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => e.into_response(),
    }
}
