//! Chat facade: one request, streamed or buffered.

pub mod client;
pub mod transport;

pub use client::{ChatClient, ChatRequest};
pub use transport::{ping, ByteStream, ChatTransport, HttpTransport, PingResult, TurnPayload};
