use harlog_core::conf::{DeliveryConfig, DeliveryMode};
use serde_json::Value;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SUBMIT_PATH: &str = "/v1/request";

/// A submission seen by the collector.
#[derive(Debug, Clone)]
pub struct Submission {
    pub authorization: Option<String>,
    pub entries: Vec<Value>,
}

/// Stand-in for the remote metrics collector.
pub struct MockCollector {
    server: MockServer,
}

impl MockCollector {
    /// Starts a collector that accepts every submission with `status`.
    pub async fn start(status: u16) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SUBMIT_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn url(&self) -> Url {
        Url::parse(&self.server.uri()).expect("mock server uri")
    }

    pub fn delivery_config(&self, mode: DeliveryMode) -> DeliveryConfig {
        DeliveryConfig::new(self.url())
            .with_mode(mode)
            .with_timeout(Duration::from_secs(2))
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|req| Submission {
                authorization: req
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned),
                entries: serde_json::from_slice(&req.body).unwrap_or_default(),
            })
            .collect()
    }

    /// Polls until at least `count` submissions arrived or two seconds passed.
    pub async fn wait_for(&self, count: usize) -> Vec<Submission> {
        for _ in 0..100 {
            let seen = self.submissions().await;
            if seen.len() >= count {
                return seen;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.submissions().await
    }
}
