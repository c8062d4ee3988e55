use crate::modules::separation::events::SeparationJob;
use anyhow::Result;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::time::Duration;
use tracing::info;

/// Work queue and log list on Redis.
///
/// Jobs travel as UTF-8 JSON on a named list: `LPUSH` to enqueue, `BRPOP`
/// to claim. `BRPOP` is atomic across consumers, so a message is delivered
/// to exactly one worker per pop; there is no acknowledgment beyond that,
/// and a consumer crash after the pop loses the job.
#[derive(Clone)]
pub struct QueueService {
    client: Client,
    work_queue: String,
    log_list: String,
}

impl QueueService {
    pub async fn new(
        connection_string: &str,
        work_queue: &str,
        log_list: &str,
    ) -> Result<Self, redis::RedisError> {
        let client = Client::open(connection_string)?;

        // Test connection
        let _conn = client.get_multiplexed_async_connection().await?;

        info!("Connected to Redis");
        Ok(Self {
            client,
            work_queue: work_queue.to_string(),
            log_list: log_list.to_string(),
        })
    }

    async fn get_conn(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    pub async fn push_job(&self, job: &SeparationJob) -> Result<()> {
        let payload = serde_json::to_string(job)?;
        let mut conn = self.get_conn().await?;
        conn.lpush::<_, _, ()>(&self.work_queue, payload).await?;
        Ok(())
    }

    /// Blocking pop with a bounded wait; `None` means the wait timed out and
    /// the caller should simply loop again.
    pub async fn pop_job(&self, timeout: Duration) -> Result<Option<String>> {
        let mut conn = self.get_conn().await?;
        let reply: Option<(String, String)> = conn
            .brpop(&self.work_queue, timeout.as_secs_f64())
            .await?;
        Ok(reply.map(|(_, raw)| raw))
    }

    /// Non-destructive copy of the pending queue, raw JSON per entry.
    pub async fn snapshot(&self) -> Result<Vec<String>> {
        let mut conn = self.get_conn().await?;
        let entries: Vec<String> = conn.lrange(&self.work_queue, 0, -1).await?;
        Ok(entries)
    }

    /// Append a line to the observability log list. The list is never read
    /// back by any component; callers discard the result (`let _ = ...`).
    pub async fn log(&self, line: impl Into<String>) -> Result<()> {
        let mut conn = self.get_conn().await?;
        conn.lpush::<_, _, ()>(&self.log_list, line.into()).await?;
        Ok(())
    }
}
