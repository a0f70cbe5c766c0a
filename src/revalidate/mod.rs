//! Cache revalidation signals.
//!
//! Every successful content mutation notifies the rendering layer which
//! public pages became stale. The notification is best-effort: failures are
//! logged and never surfaced to the mutating request.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::RevalidateConfig;

#[async_trait]
pub trait RevalidationSink: Send + Sync {
    async fn notify(&self, path: &str) -> anyhow::Result<()>;
}

/// Posts `{ "path": ... }` to the configured webhook, one request per path.
pub struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RevalidationSink for WebhookSink {
    async fn notify(&self, path: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .json(&serde_json::json!({ "path": path }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct Revalidator {
    sink: Option<Arc<dyn RevalidationSink>>,
}

impl Revalidator {
    pub fn from_config(config: &RevalidateConfig) -> Self {
        match &config.hook_url {
            Some(url) => Self {
                sink: Some(Arc::new(WebhookSink::new(url.clone()))),
            },
            None => Self::disabled(),
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn with_sink(sink: Arc<dyn RevalidationSink>) -> Self {
        Self { sink: Some(sink) }
    }

    pub async fn notify_all(&self, paths: &[&str]) {
        let Some(sink) = &self.sink else {
            return;
        };

        for path in paths {
            if let Err(e) = sink.notify(path).await {
                tracing::warn!("revalidation of {} failed: {}", path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    struct RecordingSink {
        paths: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl RevalidationSink for RecordingSink {
        async fn notify(&self, path: &str) -> anyhow::Result<()> {
            self.paths.lock().await.push(path.to_string());
            if self.fail {
                anyhow::bail!("sink down");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn notifies_every_path() {
        let sink = Arc::new(RecordingSink {
            paths: Mutex::new(Vec::new()),
            fail: false,
        });
        let revalidator = Revalidator::with_sink(sink.clone());

        revalidator.notify_all(&["/", "/ecosystem/partners"]).await;

        let seen = sink.paths.lock().await;
        assert_eq!(*seen, vec!["/".to_string(), "/ecosystem/partners".to_string()]);
    }

    #[tokio::test]
    async fn sink_failure_does_not_stop_remaining_paths() {
        let sink = Arc::new(RecordingSink {
            paths: Mutex::new(Vec::new()),
            fail: true,
        });
        let revalidator = Revalidator::with_sink(sink.clone());

        revalidator.notify_all(&["/a", "/b"]).await;

        assert_eq!(sink.paths.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn disabled_revalidator_is_a_no_op() {
        Revalidator::disabled().notify_all(&["/"]).await;
    }
}
