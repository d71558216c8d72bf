//! Shared test fakes and fixtures.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream};

use memoh::agent::{Agent, AgentFactory, AgentSpec, AskRequest, AskResult};
use memoh::capability::in_memory::{
    InMemoryConnectionRegistry, InMemoryMemoryStore, InMemoryScheduleStore,
    RecordingPlatformRegistry,
};
use memoh::capability::{
    ActionKind, Capabilities, CapabilityComposer, CapabilitySet, FinishHook, MemoryStore,
};
use memoh::error::{MemohError, Result};
use memoh::types::{ChatMessage, MemorySearchHit, MemoryUnit};

/// In-memory collaborators plus a composer wired to them.
pub struct Fixture {
    pub memory: Arc<InMemoryMemoryStore>,
    pub schedules: Arc<InMemoryScheduleStore>,
    pub platforms: Arc<RecordingPlatformRegistry>,
    pub connections: Arc<InMemoryConnectionRegistry>,
    pub composer: CapabilityComposer,
}

impl Fixture {
    pub fn new() -> Self {
        let memory = Arc::new(InMemoryMemoryStore::new());
        let schedules = Arc::new(InMemoryScheduleStore::new());
        let platforms = Arc::new(RecordingPlatformRegistry::new(["telegram", "web"]));
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let composer = CapabilityComposer::new(
            memory.clone(),
            schedules.clone(),
            platforms.clone(),
            connections.clone(),
        );
        Self {
            memory,
            schedules,
            platforms,
            connections,
            composer,
        }
    }
}

/// Memory store whose writes always fail.
pub struct FailingMemoryStore;

#[async_trait]
impl MemoryStore for FailingMemoryStore {
    async fn add_memory(&self, _unit: MemoryUnit) -> Result<()> {
        Err(MemohError::Storage("disk full".into()))
    }

    async fn search_memory(&self, _query: &str, _user_id: &str) -> Result<Vec<MemorySearchHit>> {
        Ok(Vec::new())
    }

    async fn filter_by_timestamp(
        &self,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
        _user_id: &str,
    ) -> Result<Vec<ChatMessage>> {
        Ok(Vec::new())
    }
}

type HookFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// A finish hook that records every invocation and optionally fails.
pub fn recording_hook(fail: bool) -> (FinishHook, Arc<Mutex<Vec<Vec<ChatMessage>>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();
    let hook: FinishHook = Arc::new(move |messages: Vec<ChatMessage>| -> HookFuture {
        recorded.lock().unwrap().push(messages);
        Box::pin(async move {
            if fail {
                Err(MemohError::Stream("hook failed".into()))
            } else {
                Ok(())
            }
        })
    });
    (hook, calls)
}

/// What a [`ScriptedAgentFactory`] saw when building an agent.
#[derive(Debug, Clone)]
pub struct Observed {
    pub spec: AgentSpec,
    pub user_id: String,
    pub allowed: Vec<ActionKind>,
    pub schedule_result: String,
    pub send_result: String,
    pub query: Option<String>,
    pub history_len: Option<usize>,
}

/// Builds agents that reply with a fixed message list after trying the
/// capability set they were given.
pub struct ScriptedAgentFactory {
    reply: Vec<ChatMessage>,
    fail_ask: bool,
    pub observed: Arc<Mutex<Vec<Observed>>>,
}

impl ScriptedAgentFactory {
    pub fn replying(reply: Vec<ChatMessage>) -> Self {
        Self {
            reply,
            fail_ask: false,
            observed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Vec::new(),
            fail_ask: true,
            observed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl AgentFactory for ScriptedAgentFactory {
    async fn create(&self, spec: AgentSpec, capabilities: CapabilitySet) -> Result<Box<dyn Agent>> {
        let schedule_result = match capabilities
            .schedule(memoh::types::NewSchedule {
                name: "check".into(),
                description: None,
                pattern: "* * * * *".into(),
                command: "noop".into(),
                max_calls: None,
            })
            .await
        {
            Ok(()) => "ok".to_string(),
            Err(e) => e.to_string(),
        };
        let send_result = match capabilities
            .send_message("telegram", memoh::types::OutgoingMessage::new("check"))
            .await
        {
            Ok(()) => "ok".to_string(),
            Err(e) => e.to_string(),
        };

        let mut allowed: Vec<ActionKind> = capabilities.allowed_actions().iter().copied().collect();
        allowed.sort_by_key(|a| a.to_string());

        let index = {
            let mut observed = self.observed.lock().unwrap();
            observed.push(Observed {
                spec,
                user_id: capabilities.user_id().to_string(),
                allowed,
                schedule_result,
                send_result,
                query: None,
                history_len: None,
            });
            observed.len() - 1
        };

        Ok(Box::new(ScriptedAgent {
            reply: self.reply.clone(),
            fail: self.fail_ask,
            observed: self.observed.clone(),
            index,
        }))
    }
}

struct ScriptedAgent {
    reply: Vec<ChatMessage>,
    fail: bool,
    observed: Arc<Mutex<Vec<Observed>>>,
    index: usize,
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn ask(&self, request: AskRequest) -> Result<AskResult> {
        {
            let mut observed = self.observed.lock().unwrap();
            let entry = &mut observed[self.index];
            entry.query = Some(request.query);
            entry.history_len = Some(request.messages.len());
        }
        if self.fail {
            return Err(MemohError::api(500, "model unavailable"));
        }
        Ok(AskResult {
            messages: self.reply.clone(),
        })
    }
}

/// A byte source yielding `chunks` in order.
pub fn chunk_source(
    chunks: Vec<Vec<u8>>,
) -> BoxStream<'static, std::result::Result<Vec<u8>, MemohError>> {
    Box::pin(stream::iter(chunks.into_iter().map(Ok)))
}

/// Split `text` into chunks at the given byte offsets.
pub fn split_at(text: &[u8], offsets: &[usize]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for &offset in offsets {
        chunks.push(text[start..offset].to_vec());
        start = offset;
    }
    chunks.push(text[start..].to_vec());
    chunks
}
