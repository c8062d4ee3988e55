use crate::modules::separation::events::{CallbackSpec, SeparationJob};
use crate::modules::separation::model::{stem_key, Stem};
use crate::state::AppState;
use serde_json::{json, Map, Value};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{error, info, warn};

/// Terminal result of one job attempt. Failed attempts are not re-enqueued;
/// the caller resubmits if they want another try.
#[derive(Debug)]
enum JobOutcome {
    Done { stems: Vec<String> },
    DownloadFailed,
    SeparationFailed,
}

/// Single sequential consumption loop. The bounded queue pop is the only
/// suspension point; one job's failure never takes the loop down. Run more
/// instances of this process to scale out — the queue's atomic pop is the
/// only coordination between them.
pub async fn run_separation_worker(state: AppState) {
    info!("Separation worker started");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(state.config.callback_timeout_secs))
        .build()
        .expect("failed to build HTTP client");

    let pop_timeout = Duration::from_secs(state.config.pop_timeout_secs);
    let _ = state.queue.log("worker: started").await;

    loop {
        let raw = match state.queue.pop_job(pop_timeout).await {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(e) => {
                error!("queue pop failed: {}", e);
                tokio::time::sleep(pop_timeout).await;
                continue;
            }
        };

        // Malformed descriptors are logged and dropped, never retried.
        let job: SeparationJob = match serde_json::from_str(&raw) {
            Ok(job) => job,
            Err(e) => {
                let _ = state.queue.log(format!("worker: bad job json {}", e)).await;
                continue;
            }
        };
        if job.songhash.is_empty() || job.object_name.is_empty() {
            let _ = state.queue.log("worker: missing songhash/object_name").await;
            continue;
        }

        info!("processing {}", job.songhash);
        let _ = state
            .queue
            .log(format!("worker: processing {}", job.songhash))
            .await;

        let outcome = process_job(&state, &job).await;

        if let Some(cb) = &job.callback {
            notify_callback(&http, cb, &job.songhash, &outcome).await;
        }

        if let JobOutcome::Done { stems } = &outcome {
            info!("done {}; stems={:?}", job.songhash, stems);
            let _ = state
                .queue
                .log(format!("worker: done {}; stems={:?}", job.songhash, stems))
                .await;
        }
    }
}

async fn process_job(state: &AppState, job: &SeparationJob) -> JobOutcome {
    // Scoped working area; the TempDir drop cleans it up on every exit path.
    let workdir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            // No working area means the input can never land locally.
            let _ = state.queue.log(format!("worker: download failed {}", e)).await;
            return JobOutcome::DownloadFailed;
        }
    };

    let input_path = workdir.path().join("in.mp3");
    let original = match state
        .storage
        .get_object(&state.storage.bucket_in, &job.object_name)
        .await
    {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            let _ = state
                .queue
                .log(format!("worker: download failed missing {}", job.object_name))
                .await;
            return JobOutcome::DownloadFailed;
        }
        Err(e) => {
            let _ = state.queue.log(format!("worker: download failed {}", e)).await;
            return JobOutcome::DownloadFailed;
        }
    };
    if let Err(e) = tokio::fs::write(&input_path, &original).await {
        let _ = state.queue.log(format!("worker: download failed {}", e)).await;
        return JobOutcome::DownloadFailed;
    }

    let out_dir = workdir.path().join("out");
    if let Err(e) = tokio::fs::create_dir_all(&out_dir).await {
        let _ = state.queue.log(format!("worker: demucs failed {}", e)).await;
        return JobOutcome::SeparationFailed;
    }

    let model = job.model.as_deref().unwrap_or(&state.config.model_name);
    if let Err(e) = run_demucs(&state.config.demucs_bin, &input_path, &out_dir, model).await {
        let _ = state.queue.log(format!("worker: demucs failed {}", e)).await;
        return JobOutcome::SeparationFailed;
    }

    // demucs writes <out>/<model>/<input basename>/<stem>.mp3
    let stem_dir = out_dir.join(model).join("in");

    // Stems upload independently: a missing or failed stem is omitted from
    // the reported set, it does not fail the job.
    let mut uploaded = Vec::new();
    for stem in produced_stems(&stem_dir) {
        let src = stem_dir.join(stem.file_name());
        let data = match tokio::fs::read(&src).await {
            Ok(data) => data,
            Err(e) => {
                let _ = state
                    .queue
                    .log(format!("worker: upload {} failed {}", stem, e))
                    .await;
                continue;
            }
        };
        let dst = stem_key(&job.songhash, stem);
        if let Err(e) = state
            .storage
            .put_object(&state.storage.bucket_out, &dst, data, "audio/mpeg")
            .await
        {
            let _ = state
                .queue
                .log(format!("worker: upload {} failed {}", stem, e))
                .await;
            continue;
        }
        uploaded.push(stem.as_str().to_string());
    }

    JobOutcome::Done { stems: uploaded }
}

async fn run_demucs(
    bin: &str,
    input: &Path,
    out_dir: &Path,
    model: &str,
) -> anyhow::Result<()> {
    let status = Command::new(bin)
        .arg("-n")
        .arg(model)
        .arg("--mp3")
        .arg("--out")
        .arg(out_dir)
        .arg(input)
        .status()
        .await?;
    if !status.success() {
        anyhow::bail!("exit status {}", status);
    }
    Ok(())
}

fn produced_stems(stem_dir: &Path) -> Vec<Stem> {
    Stem::ALL
        .into_iter()
        .filter(|stem| stem_dir.join(stem.file_name()).exists())
        .collect()
}

/// Fire-and-forget webhook: delivery failure is logged and discarded, it
/// never changes the job outcome.
async fn notify_callback(
    http: &reqwest::Client,
    cb: &CallbackSpec,
    songhash: &str,
    outcome: &JobOutcome,
) {
    let body = callback_body(&cb.payload, songhash, outcome);
    if let Err(e) = http.post(&cb.url).json(&body).send().await {
        warn!("callback delivery to {} failed: {}", cb.url, e);
    }
}

fn callback_body(payload: &Value, songhash: &str, outcome: &JobOutcome) -> Value {
    let mut body = match payload {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    body.insert("songhash".to_string(), json!(songhash));
    match outcome {
        JobOutcome::Done { stems } => {
            body.insert("status".to_string(), json!("done"));
            body.insert("detail".to_string(), json!({ "stems": stems }));
        }
        JobOutcome::DownloadFailed => {
            body.insert("status".to_string(), json!("error"));
            body.insert("detail".to_string(), json!("download_failed"));
        }
        JobOutcome::SeparationFailed => {
            body.insert("status".to_string(), json!("error"));
            body.insert("detail".to_string(), json!("demucs_failed"));
        }
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_stems_the_tool_produced() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vocals.mp3"), b"v").unwrap();
        std::fs::write(dir.path().join("drums.mp3"), b"d").unwrap();
        std::fs::write(dir.path().join("mixture.wav"), b"m").unwrap();
        assert_eq!(produced_stems(dir.path()), vec![Stem::Drums, Stem::Vocals]);
    }

    #[test]
    fn empty_or_missing_output_dir_yields_no_stems() {
        let dir = tempfile::tempdir().unwrap();
        assert!(produced_stems(dir.path()).is_empty());
        assert!(produced_stems(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn done_callback_reports_uploaded_subset() {
        let outcome = JobOutcome::Done {
            stems: vec!["drums".to_string(), "vocals".to_string()],
        };
        let body = callback_body(&json!({"job": 42}), "h1", &outcome);
        assert_eq!(body["job"], 42);
        assert_eq!(body["songhash"], "h1");
        assert_eq!(body["status"], "done");
        assert_eq!(body["detail"]["stems"], json!(["drums", "vocals"]));
    }

    #[test]
    fn failure_callbacks_carry_error_tags() {
        let body = callback_body(&Value::Null, "h1", &JobOutcome::DownloadFailed);
        assert_eq!(body["status"], "error");
        assert_eq!(body["detail"], "download_failed");

        let body = callback_body(&Value::Null, "h1", &JobOutcome::SeparationFailed);
        assert_eq!(body["detail"], "demucs_failed");
    }

    #[test]
    fn caller_payload_never_overrides_injected_fields() {
        let body = callback_body(
            &json!({"status": "spoofed", "tag": "keep"}),
            "h1",
            &JobOutcome::Done { stems: vec![] },
        );
        assert_eq!(body["status"], "done");
        assert_eq!(body["tag"], "keep");
    }
}
