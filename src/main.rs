use dotenvy::dotenv;
use stemsplit::config::settings::AppConfig;
use stemsplit::infrastructure::queue::redis::QueueService;
use stemsplit::infrastructure::storage::s3::StorageService;
use stemsplit::state::AppState;
use stemsplit::app;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting REST server...");

    let config = AppConfig::new().expect("incomplete environment configuration");
    let port = config.server_port;

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
    let app = app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind listener");
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await.expect("server error");
}
