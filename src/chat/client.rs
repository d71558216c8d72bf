//! Streaming and buffered turns against the agent API.

use std::future::Future;
use std::sync::Arc;

use bon::Builder;
use futures::stream::BoxStream;
use tracing::{debug, info};

use super::transport::{ChatTransport, HttpTransport, TurnPayload};
use crate::config::MemohConfig;
use crate::error::{MemohError, Result};
use crate::stream;
use crate::types::StreamEvent;

/// One user message plus optional per-request overrides.
///
/// ```
/// use memoh::chat::ChatRequest;
///
/// let request = ChatRequest::builder()
///     .message("what's on my calendar?")
///     .language("English")
///     .build();
/// assert_eq!(request.max_context_load_time, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ChatRequest {
    #[builder(into)]
    pub message: String,
    /// Minutes of history to load; falls back to the config default.
    pub max_context_load_time: Option<u32>,
    #[builder(into)]
    pub language: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            max_context_load_time: None,
            language: None,
        }
    }

    /// Wire body with overrides resolved against `config`.
    pub fn payload(&self, config: &MemohConfig) -> TurnPayload {
        TurnPayload {
            message: self.message.clone(),
            max_context_load_time: self
                .max_context_load_time
                .unwrap_or(config.max_context_load_time),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| config.language.clone()),
        }
    }
}

/// Facade over one request/response exchange.
#[derive(Clone)]
pub struct ChatClient {
    config: MemohConfig,
    transport: Arc<dyn ChatTransport>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Client over HTTP using `config`.
    pub fn new(config: MemohConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: MemohConfig, transport: Arc<dyn ChatTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &MemohConfig {
        &self.config
    }

    /// Send one turn and hand each event to `on_event` in order.
    ///
    /// The callback is awaited before the next event is delivered. Returns
    /// once `Done` arrives or the body ends.
    pub async fn stream_turn<F, Fut>(&self, request: &ChatRequest, on_event: F) -> Result<()>
    where
        F: FnMut(StreamEvent) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let body = self.open(request).await?;
        stream::decode(body, on_event).await
    }

    /// Send one turn and return its events as a stream.
    pub async fn stream_events(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        let body = self.open(request).await?;
        Ok(stream::events(body))
    }

    /// Send one turn and return the concatenated text.
    ///
    /// The first `Error` event fails the turn with its message.
    pub async fn turn(&self, request: &ChatRequest) -> Result<String> {
        let mut text = String::new();
        self.stream_turn(request, |event| {
            let outcome = match event {
                StreamEvent::TextDelta(delta) => {
                    text.push_str(&delta);
                    Ok(())
                }
                StreamEvent::Error(message) => Err(MemohError::Remote(message)),
                StreamEvent::ToolCall(_) | StreamEvent::Done => Ok(()),
            };
            futures::future::ready(outcome)
        })
        .await?;
        Ok(text)
    }

    async fn open(&self, request: &ChatRequest) -> Result<super::transport::ByteStream> {
        let token = self.config.require_token()?;
        let payload = request.payload(&self.config);
        info!(
            language = %payload.language,
            max_context_load_time = payload.max_context_load_time,
            "starting chat turn"
        );
        let body = self.transport.open(token, &payload).await?;
        debug!("agent stream opened");
        Ok(body)
    }
}
