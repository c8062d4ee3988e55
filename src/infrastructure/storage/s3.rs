use anyhow::{anyhow, Result};
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{config::BehaviorVersion, config::Credentials, config::Region, Client};
use bytes::Bytes;
use tracing::{info, warn};

/// Object storage facade over two logical buckets: inbound originals
/// (`bucket_in`) and outbound stems (`bucket_out`).
///
/// Puts are last-write-wins, so repeating an upload of identical bytes is
/// harmless; that is what the submission path's stat-then-put race relies on.
#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
    pub bucket_in: String,
    pub bucket_out: String,
}

impl StorageService {
    pub async fn new(
        endpoint: &str,
        bucket_in: &str,
        bucket_out: &str,
        access_key: &str,
        secret_key: &str,
    ) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("Connected to S3 (MinIO)");

        Self {
            client,
            bucket_in: bucket_in.to_string(),
            bucket_out: bucket_out.to_string(),
        }
    }

    /// Create both buckets if missing. Failures are logged and tolerated;
    /// the first put against a genuinely unreachable store will fail loudly.
    pub async fn ensure_buckets(&self) {
        for bucket in [&self.bucket_in, &self.bucket_out] {
            if let Err(err) = self.client.create_bucket().bucket(bucket).send().await {
                let already_there = err
                    .as_service_error()
                    .map(|e| e.is_bucket_already_owned_by_you() || e.is_bucket_already_exists())
                    .unwrap_or(false);
                if !already_there {
                    warn!("bucket error {}: {}", bucket, err);
                }
            }
        }
    }

    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| anyhow!("put {}/{}: {}", bucket, key, e))?;
        Ok(())
    }

    /// `None` when the key does not exist.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>> {
        match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(out) => {
                let data = out
                    .body
                    .collect()
                    .await
                    .map_err(|e| anyhow!("read {}/{}: {}", bucket, key, e))?;
                Ok(Some(data.into_bytes()))
            }
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    Ok(None)
                } else {
                    Err(anyhow!("get {}/{}: {}", bucket, key, err))
                }
            }
        }
    }

    pub async fn stat_object(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(anyhow!("stat {}/{}: {}", bucket, key, err))
                }
            }
        }
    }

    /// Delete reports whether the key existed. S3 deletes succeed silently
    /// on missing keys, so existence is checked first to keep removal
    /// observable (`false` both for a never-written and an already-removed
    /// key).
    pub async fn remove_object(&self, bucket: &str, key: &str) -> Result<bool> {
        if !self.stat_object(bucket, key).await? {
            return Ok(false);
        }
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("delete {}/{}: {}", bucket, key, e))?;
        Ok(true)
    }
}
