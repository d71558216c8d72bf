//! Streaming types.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Fallback for an `error` frame that carries no message.
pub const UNKNOWN_STREAM_ERROR: &str = "Unknown stream error";

/// A typed event decoded from the agent's output stream.
///
/// `Done` is terminal: nothing follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text content.
    TextDelta(String),
    /// The agent invoked a tool. The name may be absent.
    ToolCall(Option<String>),
    /// Application error reported by the producer.
    Error(String),
    /// Graceful end of the turn.
    Done,
}

impl StreamEvent {
    pub fn event_type(&self) -> StreamEventType {
        match self {
            Self::TextDelta(_) => StreamEventType::TextDelta,
            Self::ToolCall(_) => StreamEventType::ToolCall,
            Self::Error(_) => StreamEventType::Error,
            Self::Done => StreamEventType::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Type of stream event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StreamEventType {
    TextDelta,
    ToolCall,
    Error,
    Done,
}

/// JSON payload of one `data:` frame on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WireFrame {
    TextDelta {
        #[serde(
            default,
            deserialize_with = "string_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        text: Option<String>,
    },
    ToolCall {
        #[serde(
            rename = "toolName",
            default,
            deserialize_with = "string_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        tool_name: Option<String>,
    },
    Error {
        #[serde(
            default,
            deserialize_with = "string_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        error: Option<String>,
    },
}

/// Frames are classified by `type` alone; a field of the wrong JSON type
/// reads as absent instead of rejecting the frame.
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl WireFrame {
    /// Classify a frame. Text deltas without text carry nothing and yield `None`.
    pub fn into_event(self) -> Option<StreamEvent> {
        match self {
            Self::TextDelta { text } => text.filter(|t| !t.is_empty()).map(StreamEvent::TextDelta),
            Self::ToolCall { tool_name } => Some(StreamEvent::ToolCall(tool_name)),
            Self::Error { error } => Some(StreamEvent::Error(
                error.unwrap_or_else(|| UNKNOWN_STREAM_ERROR.to_string()),
            )),
        }
    }

    /// The frame for an event; `Done` has no JSON payload.
    pub fn from_event(event: &StreamEvent) -> Option<Self> {
        match event {
            StreamEvent::TextDelta(text) => Some(Self::TextDelta {
                text: Some(text.clone()),
            }),
            StreamEvent::ToolCall(tool_name) => Some(Self::ToolCall {
                tool_name: tool_name.clone(),
            }),
            StreamEvent::Error(error) => Some(Self::Error {
                error: Some(error.clone()),
            }),
            StreamEvent::Done => None,
        }
    }
}
