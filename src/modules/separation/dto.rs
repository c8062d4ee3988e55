use super::events::CallbackSpec;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SeparateRequest {
    /// Base64-encoded audio bytes. Kept optional so a missing field yields
    /// the same structured 400 as an undecodable one.
    pub mp3: Option<String>,
    pub model: Option<String>,
    pub callback: Option<CallbackSpec>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeparateResponse {
    pub hash: String,
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueueResponse {
    pub queue: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveResponse {
    pub removed: String,
}
