use crate::config::settings::AppConfig;
use crate::infrastructure::queue::redis::QueueService;
use crate::infrastructure::storage::s3::StorageService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub queue: QueueService,
    pub storage: StorageService,
}

impl AppState {
    pub fn new(config: AppConfig, queue: QueueService, storage: StorageService) -> Self {
        Self {
            config,
            queue,
            storage,
        }
    }
}
