use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Job descriptor pushed onto the work queue.
///
/// `model` is optional on the wire; the consumer falls back to its
/// configured default. `object_name` must already exist in the inbound
/// bucket when the descriptor is enqueued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparationJob {
    pub songhash: String,
    pub object_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<CallbackSpec>,
}

/// Caller-supplied completion webhook. The payload is echoed back in the
/// callback body with `songhash`/`status`/`detail` merged on top.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallbackSpec {
    pub url: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_wire_form_parses() {
        let job: SeparationJob =
            serde_json::from_str(r#"{"songhash":"h1","object_name":"uploads/h1.mp3"}"#).unwrap();
        assert_eq!(job.songhash, "h1");
        assert_eq!(job.object_name, "uploads/h1.mp3");
        assert!(job.model.is_none());
        assert!(job.callback.is_none());
    }

    #[test]
    fn callback_payload_defaults_to_null() {
        let job: SeparationJob = serde_json::from_str(
            r#"{"songhash":"h1","object_name":"uploads/h1.mp3","callback":{"url":"http://cb"}}"#,
        )
        .unwrap();
        let cb = job.callback.unwrap();
        assert_eq!(cb.url, "http://cb");
        assert!(cb.payload.is_null());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let job = SeparationJob {
            songhash: "h1".into(),
            object_name: "uploads/h1.mp3".into(),
            model: None,
            callback: None,
        };
        let wire = serde_json::to_string(&job).unwrap();
        assert!(!wire.contains("model"));
        assert!(!wire.contains("callback"));
    }
}
