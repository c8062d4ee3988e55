use super::dto::{QueueResponse, RemoveResponse, SeparateRequest, SeparateResponse};
use super::events::SeparationJob;
use super::model::{stem_key, upload_key, Stem};
use crate::common::error::ServiceError;
use crate::common::hash::content_address;
use crate::state::AppState;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use tracing::info;

const INVALID_STEM_MSG: &str =
    "track must be one of bass.mp3, vocals.mp3, drums.mp3, other.mp3";

pub struct SeparationService;

impl SeparationService {
    /// Accept a submission: address the payload, store the original at most
    /// once, and enqueue a job. Always enqueues, even when stems for this
    /// address already exist; dedup applies to storage only.
    pub async fn submit(
        state: &AppState,
        req: SeparateRequest,
    ) -> Result<SeparateResponse, ServiceError> {
        let bytes = decode_submission(req.mp3)?;

        let songhash = content_address(&bytes);
        let object_name = upload_key(&songhash);

        // Idempotent upload: skip if the original is already stored. Two
        // concurrent submissions of the same bytes may both put; the writes
        // are identical so last-write-wins is harmless.
        let exists = state
            .storage
            .stat_object(&state.storage.bucket_in, &object_name)
            .await?;
        if !exists {
            state
                .storage
                .put_object(&state.storage.bucket_in, &object_name, bytes, "audio/mpeg")
                .await?;
        }

        let job = SeparationJob {
            songhash: songhash.clone(),
            object_name,
            model: Some(
                req.model
                    .unwrap_or_else(|| state.config.model_name.clone()),
            ),
            callback: req.callback,
        };
        state.queue.push_job(&job).await?;

        let _ = state.queue.log(format!("queued {}", songhash)).await;
        info!("enqueued separation job {}", songhash);

        Ok(SeparateResponse {
            hash: songhash,
            reason: "Song enqueued for separation".to_string(),
        })
    }

    /// Non-destructive view of the pending queue, content addresses only.
    pub async fn queue_snapshot(state: &AppState) -> Result<QueueResponse, ServiceError> {
        let entries = state.queue.snapshot().await?;
        Ok(QueueResponse {
            queue: snapshot_hashes(&entries),
        })
    }

    pub async fn fetch_stem(
        state: &AppState,
        songhash: &str,
        track: &str,
    ) -> Result<(Stem, Bytes), ServiceError> {
        let stem = parse_stem(track)?;
        let key = stem_key(songhash, stem);
        let bytes = state
            .storage
            .get_object(&state.storage.bucket_out, &key)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok((stem, bytes))
    }

    /// Removing a missing (or already-removed) stem is NotFound both times;
    /// there is no distinct "already removed" state.
    pub async fn remove_stem(
        state: &AppState,
        songhash: &str,
        track: &str,
    ) -> Result<RemoveResponse, ServiceError> {
        let stem = parse_stem(track)?;
        let key = stem_key(songhash, stem);
        let removed = state
            .storage
            .remove_object(&state.storage.bucket_out, &key)
            .await?;
        if !removed {
            return Err(ServiceError::NotFound);
        }
        Ok(RemoveResponse {
            removed: stem.file_name(),
        })
    }
}

fn parse_stem(track: &str) -> Result<Stem, ServiceError> {
    Stem::parse(track).ok_or_else(|| ServiceError::Validation(INVALID_STEM_MSG.to_string()))
}

fn decode_submission(mp3: Option<String>) -> Result<Vec<u8>, ServiceError> {
    let encoded = mp3.ok_or_else(|| ServiceError::Validation("Missing 'mp3' (base64)".into()))?;
    let bytes = BASE64
        .decode(encoded.as_bytes())
        .map_err(|_| ServiceError::Validation("Invalid base64 mp3".into()))?;
    if bytes.is_empty() {
        return Err(ServiceError::Validation("Empty audio payload".into()));
    }
    Ok(bytes)
}

/// Best-effort per-entry parse; an entry that is not a job descriptor with
/// a songhash still shows up, as "(unparsed)".
fn snapshot_hashes(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|raw| {
            serde_json::from_str::<serde_json::Value>(raw)
                .ok()
                .and_then(|v| v.get("songhash").and_then(|h| h.as_str().map(String::from)))
                .unwrap_or_else(|| "(unparsed)".to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode_submission(None).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        let err = decode_submission(Some("!!not base64!!".into())).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn decode_rejects_empty_payload() {
        let err = decode_submission(Some(String::new())).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn decode_roundtrips_audio_bytes() {
        let raw = b"ID3\x03fake-mp3-bytes";
        let bytes = decode_submission(Some(BASE64.encode(raw))).unwrap();
        assert_eq!(bytes, raw);
    }

    #[test]
    fn invalid_stem_maps_to_validation() {
        let err = parse_stem("piano").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(parse_stem("base.mp3").is_ok());
    }

    #[test]
    fn snapshot_extracts_hashes_best_effort() {
        let entries = vec![
            r#"{"songhash":"abc","object_name":"uploads/abc.mp3"}"#.to_string(),
            "not json".to_string(),
            r#"{"object_name":"uploads/zzz.mp3"}"#.to_string(),
        ];
        assert_eq!(
            snapshot_hashes(&entries),
            vec!["abc".to_string(), "(unparsed)".to_string(), "(unparsed)".to_string()]
        );
    }
}
