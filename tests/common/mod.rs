#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use kolejka::config::ApiConfig;
use kolejka::database::MemoryStore;
use kolejka::server::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let api = ApiConfig {
            port,
            enable_cors: false,
            enable_request_logging: false,
        };
        let router = app(AppState::new(Arc::new(MemoryStore::new())), &api);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(body).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn delete_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    /// Create a zone and return its serialized form
    pub async fn create_zone(&self, name: &str) -> Result<Value> {
        let (status, body) = self.post_json("/v1/zones", &zone_payload(name)).await?;
        assert_eq!(status, StatusCode::OK, "zone create failed: {}", body);
        Ok(body["data"].clone())
    }

    /// Ingest a tracking point and return its serialized form
    pub async fn track(&self, tracking_id: &str, zone_id: &str, data_type: &str, ts: i64) -> Result<Value> {
        let payload = tracking_payload(tracking_id, zone_id, data_type, ts);
        let (status, body) = self.post_json("/v1/tracking", &payload).await?;
        assert_eq!(status, StatusCode::OK, "tracking failed: {}", body);
        Ok(body["data"].clone())
    }
}

/// Fresh server backed by an empty in-memory store
pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub fn tracking_payload(tracking_id: &str, zone_id: &str, data_type: &str, ts: i64) -> Value {
    json!({
        "tracking_id": tracking_id,
        "zone_id": zone_id,
        "data_type": data_type,
        "tracking_timestamp": ts,
        "lat": 50.4501,
        "lon": 30.5234
    })
}

pub fn zone_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "checkpoint near the bridge",
        "zone_type": "checkpoint",
        "lat": 10.5,
        "lon": 20,
        "radius": 3000
    })
}

pub fn assert_error(status: StatusCode, body: &Value, expected_status: StatusCode, message: &str) {
    assert_eq!(status, expected_status, "unexpected status, body: {}", body);
    assert_eq!(body, &json!({"status": "error", "data": message}));
}
