use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub mod dto;
pub mod events;
pub mod handler;
pub mod model;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/separate", post(handler::separate))
        .route("/queue", get(handler::show_queue))
        .route("/track/{songhash}/{track}", get(handler::get_track))
        // The original API accepted GET as well as DELETE for removal.
        .route(
            "/remove/{songhash}/{track}",
            axum::routing::delete(handler::remove_track).get(handler::remove_track),
        )
}
