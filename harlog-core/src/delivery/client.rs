use crate::conf::{DeliveryConfig, DeliveryMode};
use crate::delivery::DeliveryError;
use crate::har::LogEntry;
use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

const SUBMIT_PATH: &str = "v1/request";

/// HTTP client for the metrics collector.
///
/// Entries are POSTed as a JSON array, one request per distinct group, with the
/// group id as the Basic auth user and a blank password.
#[derive(Debug, Clone)]
pub struct MetricsClient {
    client: Client,
    endpoint: Url,
    mode: DeliveryMode,
}

impl MetricsClient {
    pub fn new(config: &DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("harlog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeliveryError::Client)?;

        Ok(Self {
            client,
            endpoint: submit_url(&config.collector_url),
            mode: config.mode,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Sends entries according to the configured mode.
    ///
    /// In fire-and-forget mode the submission is spawned on the current runtime
    /// and this returns at once; failures are logged and never surface here.
    pub async fn deliver(&self, entries: Vec<LogEntry>) -> Result<(), DeliveryError> {
        match self.mode {
            DeliveryMode::Await => self.send(&entries).await,
            DeliveryMode::FireAndForget => {
                let handle = Handle::try_current().map_err(|_| DeliveryError::NoRuntime)?;
                let client = self.clone();
                handle.spawn(async move {
                    if let Err(error) = client.send(&entries).await {
                        warn!(%error, entries = entries.len(), "log delivery failed");
                    }
                });
                Ok(())
            }
        }
    }

    /// Sends entries and waits for the collector to acknowledge every group.
    pub async fn send(&self, entries: &[LogEntry]) -> Result<(), DeliveryError> {
        for (group_id, batch) in by_group(entries) {
            let response = self
                .client
                .post(self.endpoint.clone())
                .basic_auth(group_id, None::<&str>)
                .json(&batch)
                .send()
                .await
                .map_err(|source| DeliveryError::Transport {
                    endpoint: self.endpoint.clone(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(DeliveryError::Rejected {
                    status: status.as_u16(),
                    count: batch.len(),
                });
            }
            debug!(status = status.as_u16(), entries = batch.len(), "log entries delivered");
        }
        Ok(())
    }
}

fn submit_url(collector_url: &Url) -> Url {
    let mut url = collector_url.clone();
    let path = format!("{}/{SUBMIT_PATH}", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

/// Splits entries by group id, keeping first-seen group order and entry order.
fn by_group(entries: &[LogEntry]) -> Vec<(&str, Vec<&LogEntry>)> {
    let mut groups: Vec<(&str, Vec<&LogEntry>)> = Vec::new();
    for entry in entries {
        let id = entry.group.id.as_str();
        match groups.iter_mut().find(|(group_id, _)| *group_id == id) {
            Some((_, batch)) => batch.push(entry),
            None => groups.push((id, vec![entry])),
        }
    }
    groups
}
