use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::separation::handler::separate,
        crate::modules::separation::handler::show_queue,
        crate::modules::separation::handler::get_track,
        crate::modules::separation::handler::remove_track,
    ),
    components(
        schemas(
            crate::modules::separation::dto::SeparateRequest,
            crate::modules::separation::dto::SeparateResponse,
            crate::modules::separation::dto::QueueResponse,
            crate::modules::separation::dto::RemoveResponse,
            crate::modules::separation::events::CallbackSpec,
            crate::common::response::ErrorBody,
        )
    ),
    tags(
        (name = "Separation", description = "Music source separation pipeline")
    )
)]
pub struct ApiDoc;
