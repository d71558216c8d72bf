//! Incremental decoder for the `data: <json>` line protocol.

use std::future::Future;

use futures::stream::{BoxStream, Stream};
use futures::StreamExt;
use tracing::{debug, trace};

use crate::error::{MemohError, Result};
use crate::types::{StreamEvent, WireFrame};

/// Prefix of every frame line. Matched byte-exactly at the start of a line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks graceful end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Turns arbitrarily chunked bytes into ordered [`StreamEvent`]s.
///
/// Complete lines are classified as they arrive; the text after the last
/// newline stays buffered until a later chunk terminates it. UTF-8 sequences
/// split across chunks are carried over rather than replaced.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: String,
    pending_bytes: Vec<u8>,
    finished: bool,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text received but not yet terminated by a newline.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Feed one chunk and return the events it completes, in order.
    ///
    /// Once `Done` has been returned every later call returns nothing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }

        let text = self.decode_utf8(chunk);
        self.buffer.push_str(&text);

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return events;
        };
        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        for line in complete[..last_newline].split('\n') {
            let Some(event) = parse_line(line) else {
                continue;
            };
            let done = event.is_done();
            events.push(event);
            if done {
                self.finished = true;
                self.buffer.clear();
                self.pending_bytes.clear();
                break;
            }
        }

        events
    }

    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending_bytes);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    if let Ok(valid) = std::str::from_utf8(valid) {
                        out.push_str(valid);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Incomplete sequence at the end: wait for the next chunk.
                            self.pending_bytes = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}

/// Classify one complete line.
///
/// Returns `None` for lines that are not frames, for unknown frame types,
/// and for payloads that are not valid JSON.
pub fn parse_line(line: &str) -> Option<StreamEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload == DONE_SENTINEL {
        return Some(StreamEvent::Done);
    }
    match serde_json::from_str::<WireFrame>(payload) {
        Ok(frame) => frame.into_event(),
        Err(err) => {
            trace!(error = %err, "dropping malformed frame");
            None
        }
    }
}

/// Decode `source`, delivering each event to `on_event` in arrival order.
///
/// The callback's future is awaited before the next event is delivered or the
/// next chunk is requested. Returns after `Done`, or when the source ends.
/// A source error or a callback error stops decoding and is returned.
pub async fn decode<S, B, E, F, Fut>(source: S, mut on_event: F) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<MemohError>,
    F: FnMut(StreamEvent) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    futures::pin_mut!(source);
    let mut decoder = StreamDecoder::new();

    while let Some(chunk) = source.next().await {
        let chunk = chunk.map_err(Into::<MemohError>::into)?;
        for event in decoder.feed(chunk.as_ref()) {
            trace!(event = %event.event_type(), "delivering stream event");
            on_event(event).await?;
        }
        if decoder.is_finished() {
            return Ok(());
        }
    }

    if !decoder.buffered().is_empty() {
        debug!(
            bytes = decoder.buffered().len(),
            "stream ended without terminator, discarding partial frame"
        );
    }
    Ok(())
}

/// Adapt a byte source into a stream of events.
///
/// The stream ends after `Done` or when the source ends; a source error is
/// yielded once and ends the stream.
pub fn events<S, B, E>(source: S) -> BoxStream<'static, Result<StreamEvent>>
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<MemohError> + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut decoder = StreamDecoder::new();
        let mut inner = std::pin::pin!(source);

        while let Some(chunk) = inner.next().await {
            match chunk {
                Ok(bytes) => {
                    for event in decoder.feed(bytes.as_ref()) {
                        yield Ok(event);
                    }
                    if decoder.is_finished() {
                        break;
                    }
                }
                Err(e) => {
                    yield Err(e.into());
                    break;
                }
            }
        }
    };
    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_classifies_frames() {
        assert_eq!(
            parse_line(r#"data: {"type":"text-delta","text":"hi"}"#),
            Some(StreamEvent::TextDelta("hi".into()))
        );
        assert_eq!(
            parse_line(r#"data: {"type":"tool-call","toolName":"web_search"}"#),
            Some(StreamEvent::ToolCall(Some("web_search".into())))
        );
        assert_eq!(
            parse_line(r#"data: {"type":"tool-call"}"#),
            Some(StreamEvent::ToolCall(None))
        );
        assert_eq!(
            parse_line(r#"data: {"type":"error","error":"rate limited"}"#),
            Some(StreamEvent::Error("rate limited".into()))
        );
        assert_eq!(parse_line("data: [DONE]"), Some(StreamEvent::Done));
        assert_eq!(parse_line("data:  [DONE]  \r"), Some(StreamEvent::Done));
    }

    #[test]
    fn mistyped_fields_do_not_hide_known_frames() {
        assert_eq!(
            parse_line(r#"data: {"type":"error","error":{"code":429,"message":"rate limited"}}"#),
            Some(StreamEvent::Error(crate::types::UNKNOWN_STREAM_ERROR.into()))
        );
        assert_eq!(
            parse_line(r#"data: {"type":"tool-call","toolName":5}"#),
            Some(StreamEvent::ToolCall(None))
        );
        assert_eq!(parse_line(r#"data: {"type":"text-delta","text":7}"#), None);
    }

    #[test]
    fn parse_line_drops_everything_else() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line(": keep-alive"), None);
        assert_eq!(parse_line("event: message"), None);
        assert_eq!(parse_line("data:[DONE]"), None);
        assert_eq!(parse_line(" data: [DONE]"), None);
        assert_eq!(parse_line("data: {not json"), None);
        assert_eq!(parse_line(r#"data: {"type":"reasoning","text":"x"}"#), None);
        assert_eq!(parse_line(r#"data: {"type":"text-delta","text":""}"#), None);
        assert_eq!(parse_line(r#"data: {"type":"text-delta"}"#), None);
        assert_eq!(parse_line(r#"data: {"text":"no type"}"#), None);
    }

    #[test]
    fn partial_line_stays_buffered() {
        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed(b"data: {\"type\":\"text-delta\",").is_empty());
        assert_eq!(decoder.buffered(), "data: {\"type\":\"text-delta\",");

        let events = decoder.feed(b"\"text\":\"ok\"}\ndata: {\"ty");
        assert_eq!(events, vec![StreamEvent::TextDelta("ok".into())]);
        assert_eq!(decoder.buffered(), "data: {\"ty");
    }

    #[test]
    fn multibyte_character_split_across_chunks_survives() {
        let line = "data: {\"type\":\"text-delta\",\"text\":\"héllo 世界\"}\n";
        let bytes = line.as_bytes();
        let split = line.find('世').unwrap() + 1;

        let mut decoder = StreamDecoder::new();
        assert!(decoder.feed(&bytes[..split]).is_empty());
        let events = decoder.feed(&bytes[split..]);
        assert_eq!(events, vec![StreamEvent::TextDelta("héllo 世界".into())]);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let mut decoder = StreamDecoder::new();
        let mut chunk = b"data: {\"type\":\"text-delta\",\"text\":\"a".to_vec();
        chunk.push(0xFF);
        chunk.extend_from_slice(b"b\"}\n");
        let events = decoder.feed(&chunk);
        assert_eq!(events, vec![StreamEvent::TextDelta("a\u{FFFD}b".into())]);
    }

    #[test]
    fn nothing_is_emitted_after_done() {
        let mut decoder = StreamDecoder::new();
        let events = decoder.feed(
            b"data: {\"type\":\"text-delta\",\"text\":\"a\"}\ndata: [DONE]\ndata: {\"type\":\"text-delta\",\"text\":\"b\"}\n",
        );
        assert_eq!(
            events,
            vec![StreamEvent::TextDelta("a".into()), StreamEvent::Done]
        );
        assert!(decoder.is_finished());
        assert!(decoder
            .feed(b"data: {\"type\":\"text-delta\",\"text\":\"c\"}\n")
            .is_empty());
    }
}
