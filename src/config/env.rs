use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    RedisUrl,
    MinioUrl,
    MinioAccessKey,
    MinioSecretKey,
    BucketIn,
    BucketOut,
    WorkQueue,
    LogList,
    ModelName,
    DemucsBin,
    PopTimeoutSecs,
    CallbackTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::RedisUrl => "REDIS_URL",
            EnvKey::MinioUrl => "MINIO_ENDPOINT",
            EnvKey::MinioAccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::MinioSecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::BucketIn => "BUCKET_IN",
            EnvKey::BucketOut => "BUCKET_OUT",
            EnvKey::WorkQueue => "WORK_QUEUE",
            EnvKey::LogList => "LOG_LIST",
            EnvKey::ModelName => "MODEL_NAME",
            EnvKey::DemucsBin => "DEMUCS_BIN",
            EnvKey::PopTimeoutSecs => "POP_TIMEOUT_SECS",
            EnvKey::CallbackTimeoutSecs => "CALLBACK_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
