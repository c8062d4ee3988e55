use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub redis_url: String,
    pub minio_url: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    pub bucket_in: String,
    pub bucket_out: String,
    pub work_queue: String,
    pub log_list: String,
    pub model_name: String,
    pub demucs_bin: String,
    pub pop_timeout_secs: u64,
    pub callback_timeout_secs: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 5000),
            redis_url: env::get(EnvKey::RedisUrl)?,
            minio_url: env::get(EnvKey::MinioUrl)?,
            minio_access_key: env::get(EnvKey::MinioAccessKey)?,
            minio_secret_key: env::get(EnvKey::MinioSecretKey)?,
            bucket_in: env::get_or(EnvKey::BucketIn, "queue"),
            bucket_out: env::get_or(EnvKey::BucketOut, "output"),
            work_queue: env::get_or(EnvKey::WorkQueue, "toWorker"),
            log_list: env::get_or(EnvKey::LogList, "logging"),
            model_name: env::get_or(EnvKey::ModelName, "htdemucs"),
            demucs_bin: env::get_or(EnvKey::DemucsBin, "demucs"),
            pop_timeout_secs: env::get_parsed(EnvKey::PopTimeoutSecs, 5),
            callback_timeout_secs: env::get_parsed(EnvKey::CallbackTimeoutSecs, 5),
        })
    }
}
