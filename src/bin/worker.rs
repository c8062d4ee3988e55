use dotenvy::dotenv;
use stemsplit::config::settings::AppConfig;
use stemsplit::infrastructure::queue::redis::QueueService;
use stemsplit::infrastructure::storage::s3::StorageService;
use stemsplit::state::AppState;
use stemsplit::workers::separator;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting separation worker...");

    let config = AppConfig::new().expect("incomplete environment configuration");

    let queue = QueueService::new(&config.redis_url, &config.work_queue, &config.log_list)
        .await
        .expect("failed to connect to Redis");

    let storage = StorageService::new(
        &config.minio_url,
        &config.bucket_in,
        &config.bucket_out,
        &config.minio_access_key,
        &config.minio_secret_key,
    )
    .await;
    storage.ensure_buckets().await;

    let state = AppState::new(config, queue, storage);

    separator::run_separation_worker(state).await;
}
