//! Byte transport to the agent API.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MemohConfig;
use crate::error::{unified::status_to_error, MemohError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PING_TIMEOUT: Duration = Duration::from_secs(5);
const PING_MESSAGE_LIMIT: usize = 100;

/// Raw response body, chunked however the network delivered it.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>>>;

/// JSON body of one turn request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnPayload {
    pub message: String,
    pub max_context_load_time: u32,
    pub language: String,
}

/// Opens the response body for one turn.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn open(&self, token: &str, payload: &TurnPayload) -> Result<ByteStream>;
}

/// `POST {api_url}/agent/stream` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &MemohConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn stream_url(&self) -> String {
        format!("{}/agent/stream", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn open(&self, token: &str, payload: &TurnPayload) -> Result<ByteStream> {
        let url = self.stream_url();
        debug!(url = %url, "opening agent stream");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        let body = resp
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(MemohError::from));
        Ok(Box::pin(body))
    }
}

/// Outcome of a reachability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PingResult {
    fn failed(status: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// `GET {api_url}/` with a short timeout. Never fails; problems are
/// reported in the result.
pub async fn ping(config: &MemohConfig) -> PingResult {
    let client = match reqwest::Client::builder().timeout(PING_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => return PingResult::failed(None, e.to_string()),
    };

    let mut request = client.get(format!("{}/", config.base_url()));
    if let Ok(token) = config.require_token() {
        request = request.bearer_auth(token);
    }

    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => return PingResult::failed(None, e.to_string()),
    };

    let status = resp.status().as_u16();
    if !resp.status().is_success() {
        return PingResult::failed(Some(status), format!("HTTP {status}"));
    }

    let text = resp.text().await.unwrap_or_default();
    PingResult {
        success: true,
        status: Some(status),
        message: Some(text.chars().take(PING_MESSAGE_LIMIT).collect()),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_keys() {
        let payload = TurnPayload {
            message: "hi".into(),
            max_context_load_time: 60,
            language: "English".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "hi",
                "maxContextLoadTime": 60,
                "language": "English",
            })
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let config = MemohConfig::new().with_api_url("http://localhost:7002/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.stream_url(), "http://localhost:7002/agent/stream");
    }
}
