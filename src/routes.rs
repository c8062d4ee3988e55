use crate::docs::ApiDoc;
use crate::state::AppState;
use axum::response::Html;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", axum::routing::get(root))
        .nest("/apiv1", api_routes())
        .nest("/apiv1", crate::modules::separation::router())
        .layer(cors)
}

// Plain HTML banner so ingress health checks have something to hit.
async fn root() -> Html<&'static str> {
    Html("<h1>Music Separation Server</h1><p>Use /apiv1/* endpoints.</p>")
}

fn api_routes() -> Router<AppState> {
    Router::new().route("/health", axum::routing::get(|| async { "ok" }))
}
